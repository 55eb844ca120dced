use miette::miette;
use serde::{Deserialize, Serialize};
use std::{env, fs};

#[derive(Deserialize, Serialize, Clone)]
pub struct CoreConfig {
    pub listen_addr: String,
    /// Directory the asset store writes into; also served at `/uploads/`.
    pub upload_dir: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".into(),
            upload_dir: "public/uploads".into(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,
}

impl Config {
    pub fn load(config_file: &str) -> miette::Result<Config> {
        let mut config_string = fs::read_to_string(config_file)
            .map_err(|e| miette!("error reading config file {}", e))?;
        // substitute environment variables in config file
        for (k, v) in env::vars() {
            config_string = config_string.replace(&format!("${}", k), &v);
        }

        Ok(toml::from_str(&config_string).map_err(|e| miette!("error parsing config file {}", e))?)
    }
}
