//! The editable markdown source.

/// Single source of truth for the editing surface.
///
/// An explicit owned value: callers thread it between the editing surface,
/// the drop adapter, and the render pipeline instead of sharing ambient
/// state. No history is kept; every mutation discards the prior text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Current document text.
    pub fn read(&self) -> &str {
        &self.text
    }

    /// Replaces the whole text. The editing surface is a fully-controlled
    /// field, so user edits arrive as the complete new content.
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Appends `suffix` at the end of the document. The only mutation path
    /// the drop adapter uses.
    pub fn append(&mut self, suffix: &str) {
        self.text.push_str(suffix);
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
