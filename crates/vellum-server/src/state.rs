use std::sync::Arc;

use vellum_common::assets::FsAssetStore;
use vellum_renderer::Pipeline;

use crate::config::Config;

pub struct AppStateInner {
    pub cfg: Config,
    pub store: FsAssetStore,
    pub pipeline: Pipeline,
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(cfg: Config) -> Self {
        let store = FsAssetStore::new(cfg.core.upload_dir.as_str());
        // Loads the syntax and theme sets once; render passes share them.
        let pipeline = Pipeline::new();
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                store,
                pipeline,
            }),
        }
    }

    pub fn cfg(&self) -> &Config {
        &self.inner.cfg
    }

    pub fn store(&self) -> &FsAssetStore {
        &self.inner.store
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.inner.pipeline
    }
}
