//! The presentation directive tree a render pass produces.

/// One presentation directive, produced for exactly one node.
///
/// Instruction trees are ephemeral: recomputed on every pass, owned by the
/// pipeline's current output, and never fed back into parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderInstruction {
    /// A styled element wrapping its children.
    Element {
        tag: &'static str,
        attrs: Vec<(&'static str, String)>,
        children: Vec<RenderInstruction>,
    },
    /// Literal text, escaped when serialized.
    Text(String),
    /// Markup prerendered by an external engine (highlighter, typesetter);
    /// serialized verbatim.
    Raw(String),
}

impl RenderInstruction {
    pub fn element(tag: &'static str, children: Vec<RenderInstruction>) -> Self {
        RenderInstruction::Element {
            tag,
            attrs: Vec::new(),
            children,
        }
    }

    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let RenderInstruction::Element { attrs, .. } = &mut self {
            attrs.push((name, value.into()));
        }
        self
    }

    pub fn text(text: impl Into<String>) -> Self {
        RenderInstruction::Text(text.into())
    }

    /// Attribute value, if this is an element carrying it.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            RenderInstruction::Element { attrs, .. } => attrs
                .iter()
                .find(|(attr, _)| *attr == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&'static str> {
        match self {
            RenderInstruction::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Number of instructions in this subtree, itself included.
    pub fn count(&self) -> usize {
        match self {
            RenderInstruction::Element { children, .. } => {
                1 + children.iter().map(RenderInstruction::count).sum::<usize>()
            }
            _ => 1,
        }
    }
}
