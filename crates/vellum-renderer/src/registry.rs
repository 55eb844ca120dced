//! The node-kind to strategy mapping.

use std::collections::HashMap;
use std::sync::Arc;

use vellum_markdown::{Node, NodeKind, collect_text};

use crate::instruction::RenderInstruction;
use crate::strategies;

/// A rendering strategy for one node kind.
///
/// `children` arrives already rendered (depth-first, source order); the
/// strategy only decides how this node wraps or replaces them. Strategies
/// are pure values: no side effects, no state mutated across calls.
pub trait RenderStrategy: Send + Sync {
    fn render(&self, node: &Node, children: Vec<RenderInstruction>) -> RenderInstruction;
}

impl<F> RenderStrategy for F
where
    F: Fn(&Node, Vec<RenderInstruction>) -> RenderInstruction + Send + Sync,
{
    fn render(&self, node: &Node, children: Vec<RenderInstruction>) -> RenderInstruction {
        self(node, children)
    }
}

/// Renders a node as its literal text content. The fallback for any kind
/// without an installed strategy, which keeps the pipeline total.
pub struct LiteralStrategy;

impl RenderStrategy for LiteralStrategy {
    fn render(&self, node: &Node, _children: Vec<RenderInstruction>) -> RenderInstruction {
        RenderInstruction::Text(collect_text(std::slice::from_ref(node)))
    }
}

/// Mapping from node kind to rendering strategy.
///
/// Overriding one kind never affects another: lookups are pure and each kind
/// resolves independently, falling back to [`LiteralStrategy`].
pub struct Registry {
    strategies: HashMap<NodeKind, Arc<dyn RenderStrategy>>,
    fallback: Arc<dyn RenderStrategy>,
}

impl Registry {
    /// An empty registry: every kind renders literally.
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
            fallback: Arc::new(LiteralStrategy),
        }
    }

    /// A registry with the default strategy for every kind installed.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        strategies::install_defaults(&mut registry);
        registry
    }

    /// Installs `strategy` for `kind`, replacing any previous one.
    pub fn set(&mut self, kind: NodeKind, strategy: Arc<dyn RenderStrategy>) -> &mut Self {
        self.strategies.insert(kind, strategy);
        self
    }

    /// The active strategy for `kind`.
    pub fn strategy(&self, kind: NodeKind) -> &Arc<dyn RenderStrategy> {
        self.strategies.get(&kind).unwrap_or(&self.fallback)
    }

    pub fn has_strategy(&self, kind: NodeKind) -> bool {
        self.strategies.contains_key(&kind)
    }
}
