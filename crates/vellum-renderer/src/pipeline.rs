//! The document rendering pipeline.

use vellum_markdown::{Node, parse};

use crate::html::write_html;
use crate::instruction::RenderInstruction;
use crate::registry::Registry;

/// Parses document text and maps every node through the registry.
///
/// The whole document is re-parsed and re-rendered on every call; there is
/// no incremental path. That trades throughput on very large documents for
/// correctness and simplicity, which is the right trade at interactive
/// document sizes.
pub struct Pipeline {
    registry: Registry,
}

impl Pipeline {
    /// A pipeline with the default strategies installed.
    pub fn new() -> Self {
        Self {
            registry: Registry::with_defaults(),
        }
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Renders document text to an instruction tree.
    ///
    /// Total: any input yields a tree, in source order, one instruction per
    /// node.
    pub fn render(&self, text: &str) -> Vec<RenderInstruction> {
        parse(text)
            .iter()
            .map(|node| self.render_node(node))
            .collect()
    }

    /// Renders document text straight to an HTML string.
    pub fn render_html(&self, text: &str) -> String {
        write_html(&self.render(text))
    }

    fn render_node(&self, node: &Node) -> RenderInstruction {
        // Depth-first: children are rendered before their parent's strategy
        // runs, so a strategy only ever wraps finished output.
        let children = node
            .children()
            .iter()
            .map(|child| self.render_node(child))
            .collect();
        self.registry.strategy(node.kind()).render(node, children)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
