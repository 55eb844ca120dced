//! Markdown parsing for vellum.
//!
//! Turns raw document text into an owned [`Node`] tree. The accepted dialect
//! is CommonMark extended with pipe tables, strikethrough, task lists, and
//! math delimiters (`$...$` inline, `$$...$$` display).
//!
//! Parsing is total: every input yields some tree. Unclosed math delimiters,
//! unclosed code fences, and malformed tables degrade to best-effort literal
//! text rather than raising an error.

pub mod node;
mod parser;

pub use node::{CellAlignment, Node, NodeKind, collect_text};
pub use parser::parse;
