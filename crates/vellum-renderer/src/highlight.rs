//! Syntax highlighting for fenced code blocks.

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;
use tracing::debug;

const THEME: &str = "base16-ocean.dark";

/// Wraps syntect's default syntax and theme sets.
///
/// Loading the sets is expensive, so one highlighter is built per pipeline
/// and shared across render passes.
pub struct CodeHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl CodeHighlighter {
    pub fn new() -> Self {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let mut themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .remove(THEME)
            .expect("syntect ships its default themes");
        Self { syntaxes, theme }
    }

    /// Highlighted HTML for `code`, or `None` when the language tag does not
    /// match any known syntax (the caller falls back to unstyled monospace).
    pub fn highlight(&self, language: &str, code: &str) -> Option<String> {
        let syntax = self.syntaxes.find_syntax_by_token(language)?;
        match highlighted_html_for_string(code, &self.syntaxes, syntax, &self.theme) {
            Ok(html) => Some(html),
            Err(err) => {
                debug!(language, %err, "highlighting failed, falling back to plain rendering");
                None
            }
        }
    }
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new()
    }
}
