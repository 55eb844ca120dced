//! Default rendering strategies, one per node kind.
//!
//! Each strategy is a small wrapping rule; the interesting ones are code
//! (syntax highlighting), math (typesetting), images (asset-root
//! resolution), and table cells (header/body split).

use std::sync::Arc;

use vellum_common::assets::ASSET_ROOT;
use vellum_markdown::{CellAlignment, Node, NodeKind, collect_text};

use crate::highlight::CodeHighlighter;
use crate::instruction::RenderInstruction;
use crate::math;
use crate::registry::{LiteralStrategy, Registry, RenderStrategy};

fn literal(node: &Node) -> RenderInstruction {
    RenderInstruction::Text(collect_text(std::slice::from_ref(node)))
}

/// Wraps rendered children in a fixed element.
pub struct WrapStrategy {
    tag: &'static str,
}

impl WrapStrategy {
    pub fn new(tag: &'static str) -> Self {
        Self { tag }
    }
}

impl RenderStrategy for WrapStrategy {
    fn render(&self, _node: &Node, children: Vec<RenderInstruction>) -> RenderInstruction {
        RenderInstruction::element(self.tag, children)
    }
}

pub struct HeadingStrategy;

impl RenderStrategy for HeadingStrategy {
    fn render(&self, node: &Node, children: Vec<RenderInstruction>) -> RenderInstruction {
        let Node::Heading { level, .. } = node else {
            return literal(node);
        };
        let tag = match level {
            1 => "h1",
            2 => "h2",
            3 => "h3",
            4 => "h4",
            5 => "h5",
            _ => "h6",
        };
        RenderInstruction::element(tag, children)
    }
}

pub struct ListStrategy;

impl RenderStrategy for ListStrategy {
    fn render(&self, node: &Node, children: Vec<RenderInstruction>) -> RenderInstruction {
        let Node::List { ordered, start, .. } = node else {
            return literal(node);
        };
        if *ordered {
            let element = RenderInstruction::element("ol", children);
            match start {
                Some(start) if *start != 1 => element.with_attr("start", start.to_string()),
                _ => element,
            }
        } else {
            RenderInstruction::element("ul", children)
        }
    }
}

/// Header cells become `th`, body cells `td`; column alignment rides along
/// as an inline style so the preview needs no layout computation.
pub struct TableCellStrategy;

impl RenderStrategy for TableCellStrategy {
    fn render(&self, node: &Node, children: Vec<RenderInstruction>) -> RenderInstruction {
        let Node::TableCell { header, alignment, .. } = node else {
            return literal(node);
        };
        let tag = if *header { "th" } else { "td" };
        let element = RenderInstruction::element(tag, children);
        match alignment {
            CellAlignment::None => element,
            CellAlignment::Left => element.with_attr("style", "text-align: left"),
            CellAlignment::Center => element.with_attr("style", "text-align: center"),
            CellAlignment::Right => element.with_attr("style", "text-align: right"),
        }
    }
}

/// Fenced code with a recognized language tag renders through the
/// highlighter; anything else falls back to unstyled monospace.
pub struct CodeBlockStrategy {
    highlighter: Arc<CodeHighlighter>,
}

impl CodeBlockStrategy {
    pub fn new(highlighter: Arc<CodeHighlighter>) -> Self {
        Self { highlighter }
    }
}

impl RenderStrategy for CodeBlockStrategy {
    fn render(&self, node: &Node, _children: Vec<RenderInstruction>) -> RenderInstruction {
        let Node::CodeBlock { language, code } = node else {
            return literal(node);
        };
        if let Some(language) = language {
            if let Some(html) = self.highlighter.highlight(language, code) {
                return RenderInstruction::Raw(html);
            }
        }
        // The fence's trailing newline is markup, not content.
        let code = code.strip_suffix('\n').unwrap_or(code);
        RenderInstruction::element(
            "pre",
            vec![RenderInstruction::element(
                "code",
                vec![RenderInstruction::text(code)],
            )],
        )
    }
}

pub struct InlineCodeStrategy;

impl RenderStrategy for InlineCodeStrategy {
    fn render(&self, node: &Node, _children: Vec<RenderInstruction>) -> RenderInstruction {
        let Node::InlineCode(code) = node else {
            return literal(node);
        };
        RenderInstruction::element("code", vec![RenderInstruction::text(code.clone())])
    }
}

/// Both math kinds typeset through the external engine; the delimiter
/// semantics (inline vs display) are preserved in the chosen display mode.
pub struct MathStrategy;

impl RenderStrategy for MathStrategy {
    fn render(&self, node: &Node, _children: Vec<RenderInstruction>) -> RenderInstruction {
        match node {
            Node::MathInline(src) => math::typeset(src, false),
            Node::MathBlock(src) => math::typeset(src, true),
            _ => literal(node),
        }
    }
}

/// Resolves image sources against the asset root. Whether the asset exists
/// is not checked here; a broken reference renders as an image element that
/// fails to load.
pub struct ImageStrategy {
    asset_root: String,
}

impl ImageStrategy {
    pub fn new(asset_root: impl Into<String>) -> Self {
        Self {
            asset_root: asset_root.into(),
        }
    }

    fn resolve(&self, src: &str) -> String {
        if src.contains("://") || src.starts_with('/') || src.starts_with("data:") {
            src.to_string()
        } else {
            format!("{}{src}", self.asset_root)
        }
    }
}

impl RenderStrategy for ImageStrategy {
    fn render(&self, node: &Node, _children: Vec<RenderInstruction>) -> RenderInstruction {
        let Node::Image { alt, src, title } = node else {
            return literal(node);
        };
        let element = RenderInstruction::element("img", Vec::new())
            .with_attr("src", self.resolve(src))
            .with_attr("alt", alt.clone());
        if title.is_empty() {
            element
        } else {
            element.with_attr("title", title.clone())
        }
    }
}

pub struct LinkStrategy;

impl RenderStrategy for LinkStrategy {
    fn render(&self, node: &Node, children: Vec<RenderInstruction>) -> RenderInstruction {
        let Node::Link { href, title, .. } = node else {
            return literal(node);
        };
        let element =
            RenderInstruction::element("a", children).with_attr("href", href.clone());
        if title.is_empty() {
            element
        } else {
            element.with_attr("title", title.clone())
        }
    }
}

pub struct TaskMarkerStrategy;

impl RenderStrategy for TaskMarkerStrategy {
    fn render(&self, node: &Node, _children: Vec<RenderInstruction>) -> RenderInstruction {
        let Node::TaskMarker { checked } = node else {
            return literal(node);
        };
        let element = RenderInstruction::element("input", Vec::new())
            .with_attr("type", "checkbox")
            .with_attr("disabled", "");
        if *checked {
            element.with_attr("checked", "")
        } else {
            element
        }
    }
}

/// Installs the default strategy for every node kind.
pub fn install_defaults(registry: &mut Registry) {
    let highlighter = Arc::new(CodeHighlighter::new());

    registry
        .set(NodeKind::Paragraph, Arc::new(WrapStrategy::new("p")))
        .set(NodeKind::Heading, Arc::new(HeadingStrategy))
        .set(NodeKind::List, Arc::new(ListStrategy))
        .set(NodeKind::ListItem, Arc::new(WrapStrategy::new("li")))
        .set(NodeKind::BlockQuote, Arc::new(WrapStrategy::new("blockquote")))
        .set(NodeKind::Table, Arc::new(WrapStrategy::new("table")))
        .set(NodeKind::TableRow, Arc::new(WrapStrategy::new("tr")))
        .set(NodeKind::TableCell, Arc::new(TableCellStrategy))
        .set(
            NodeKind::CodeBlock,
            Arc::new(CodeBlockStrategy::new(highlighter)),
        )
        .set(NodeKind::InlineCode, Arc::new(InlineCodeStrategy))
        .set(NodeKind::MathInline, Arc::new(MathStrategy))
        .set(NodeKind::MathBlock, Arc::new(MathStrategy))
        .set(NodeKind::Image, Arc::new(ImageStrategy::new(ASSET_ROOT)))
        .set(NodeKind::Link, Arc::new(LinkStrategy))
        .set(NodeKind::Emphasis, Arc::new(WrapStrategy::new("em")))
        .set(NodeKind::Strong, Arc::new(WrapStrategy::new("strong")))
        .set(NodeKind::Strikethrough, Arc::new(WrapStrategy::new("del")))
        .set(NodeKind::TaskMarker, Arc::new(TaskMarkerStrategy))
        .set(NodeKind::Text, Arc::new(LiteralStrategy))
        .set(
            NodeKind::SoftBreak,
            Arc::new(|_: &Node, _: Vec<RenderInstruction>| RenderInstruction::text("\n")),
        )
        .set(
            NodeKind::HardBreak,
            Arc::new(|_: &Node, _: Vec<RenderInstruction>| {
                RenderInstruction::element("br", Vec::new())
            }),
        )
        .set(
            NodeKind::Rule,
            Arc::new(|_: &Node, _: Vec<RenderInstruction>| {
                RenderInstruction::element("hr", Vec::new())
            }),
        );
}
