//! Event-stream to node-tree folding.

use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser, Tag};
use tracing::trace;

use crate::node::{CellAlignment, Node, collect_text};

/// Parses document text into a node tree.
///
/// Never fails: whatever pulldown-cmark cannot match against the extended
/// grammar comes through as literal text events, so malformed input degrades
/// instead of erroring.
pub fn parse(text: &str) -> Vec<Node> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_MATH);

    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(text, options) {
        builder.event(event);
    }
    let tree = builder.finish();
    trace!(nodes = tree.iter().map(Node::count).sum::<usize>(), "parsed document");
    tree
}

/// An open container on the builder stack.
enum Frame {
    Paragraph,
    Heading(u8),
    List { ordered: bool, start: Option<u64> },
    Item { ordered: bool },
    BlockQuote,
    Table { alignments: Vec<CellAlignment> },
    TableHead,
    TableRow,
    TableCell { header: bool, alignment: CellAlignment },
    CodeBlock { language: Option<String>, code: String },
    Image { src: String, title: String },
    Link { href: String, title: String },
    Emphasis,
    Strong,
    Strikethrough,
    /// Containers the node model does not distinguish; children splice into
    /// the parent so nothing in the source is dropped.
    Transparent,
}

struct TreeBuilder {
    stack: Vec<(Frame, Vec<Node>)>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![(Frame::Transparent, Vec::new())],
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => {
                if let (Frame::CodeBlock { code, .. }, _) =
                    self.stack.last_mut().expect("stack never empty")
                {
                    code.push_str(&text);
                } else {
                    self.leaf(Node::Text(text.into_string()));
                }
            }
            Event::Code(text) => self.leaf(Node::InlineCode(text.into_string())),
            Event::InlineMath(text) => self.leaf(Node::MathInline(text.into_string())),
            Event::DisplayMath(text) => self.leaf(Node::MathBlock(text.into_string())),
            // Raw HTML is not executed; it degrades to literal text.
            Event::Html(html) | Event::InlineHtml(html) => {
                self.leaf(Node::Text(html.into_string()))
            }
            Event::SoftBreak => self.leaf(Node::SoftBreak),
            Event::HardBreak => self.leaf(Node::HardBreak),
            Event::Rule => self.leaf(Node::Rule),
            Event::TaskListMarker(checked) => self.leaf(Node::TaskMarker { checked }),
            Event::FootnoteReference(name) => self.leaf(Node::Text(format!("[^{name}]"))),
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph,
            Tag::Heading { level, .. } => Frame::Heading(heading_level(level)),
            Tag::BlockQuote(_) => Frame::BlockQuote,
            Tag::List(start) => Frame::List {
                ordered: start.is_some(),
                start,
            },
            Tag::Item => Frame::Item {
                ordered: self.enclosing_list_is_ordered(),
            },
            Tag::Table(alignments) => Frame::Table {
                alignments: alignments.iter().map(|a| CellAlignment::from(*a)).collect(),
            },
            Tag::TableHead => Frame::TableHead,
            Tag::TableRow => Frame::TableRow,
            Tag::TableCell => {
                let (header, alignment) = self.cell_position();
                Frame::TableCell { header, alignment }
            }
            Tag::CodeBlock(kind) => Frame::CodeBlock {
                language: match kind {
                    CodeBlockKind::Fenced(tag) => tag
                        .split_whitespace()
                        .next()
                        .filter(|token| !token.is_empty())
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                },
                code: String::new(),
            },
            Tag::Emphasis => Frame::Emphasis,
            Tag::Strong => Frame::Strong,
            Tag::Strikethrough => Frame::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => Frame::Link {
                href: dest_url.into_string(),
                title: title.into_string(),
            },
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                src: dest_url.into_string(),
                title: title.into_string(),
            },
            _ => Frame::Transparent,
        };
        self.stack.push((frame, Vec::new()));
    }

    fn end(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        let (frame, children) = self.stack.pop().expect("stack underflow");
        let node = match frame {
            Frame::Paragraph => Node::Paragraph { children },
            Frame::Heading(level) => Node::Heading { level, children },
            Frame::List { ordered, start } => Node::List {
                ordered,
                start,
                children,
            },
            Frame::Item { ordered } => Node::ListItem { ordered, children },
            Frame::BlockQuote => Node::BlockQuote { children },
            Frame::Table { .. } => Node::Table { children },
            Frame::TableHead => Node::TableRow {
                header: true,
                children,
            },
            Frame::TableRow => Node::TableRow {
                header: false,
                children,
            },
            Frame::TableCell { header, alignment } => Node::TableCell {
                header,
                alignment,
                children,
            },
            Frame::CodeBlock { language, code } => Node::CodeBlock { language, code },
            Frame::Image { src, title } => Node::Image {
                alt: collect_text(&children),
                src,
                title,
            },
            Frame::Link { href, title } => Node::Link {
                href,
                title,
                children,
            },
            Frame::Emphasis => Node::Emphasis { children },
            Frame::Strong => Node::Strong { children },
            Frame::Strikethrough => Node::Strikethrough { children },
            Frame::Transparent => {
                self.extend(children);
                return;
            }
        };
        self.leaf(node);
    }

    fn leaf(&mut self, node: Node) {
        self.stack
            .last_mut()
            .expect("stack never empty")
            .1
            .push(node);
    }

    fn extend(&mut self, nodes: Vec<Node>) {
        self.stack
            .last_mut()
            .expect("stack never empty")
            .1
            .extend(nodes);
    }

    fn enclosing_list_is_ordered(&self) -> bool {
        for (frame, _) in self.stack.iter().rev() {
            if let Frame::List { ordered, .. } = frame {
                return *ordered;
            }
        }
        false
    }

    /// Header flag and column alignment for the cell about to open, derived
    /// from the enclosing row and table frames.
    fn cell_position(&self) -> (bool, CellAlignment) {
        let mut header = false;
        let mut column = 0;
        let mut alignment = CellAlignment::None;
        for (frame, children) in self.stack.iter().rev() {
            match frame {
                Frame::TableHead => {
                    header = true;
                    column = children.len();
                }
                Frame::TableRow => column = children.len(),
                Frame::Table { alignments } => {
                    alignment = alignments.get(column).copied().unwrap_or_default();
                    break;
                }
                _ => {}
            }
        }
        (header, alignment)
    }

    fn finish(mut self) -> Vec<Node> {
        // pulldown-cmark balances start/end tags, so only the root should
        // remain; drain defensively all the same.
        while self.stack.len() > 1 {
            self.end();
        }
        self.stack.pop().map(|(_, children)| children).unwrap_or_default()
    }
}

fn heading_level(level: pulldown_cmark::HeadingLevel) -> u8 {
    use pulldown_cmark::HeadingLevel::*;
    match level {
        H1 => 1,
        H2 => 2,
        H3 => 3,
        H4 => 4,
        H5 => 5,
        H6 => 6,
    }
}

impl From<Alignment> for CellAlignment {
    fn from(alignment: Alignment) -> Self {
        match alignment {
            Alignment::None => CellAlignment::None,
            Alignment::Left => CellAlignment::Left,
            Alignment::Center => CellAlignment::Center,
            Alignment::Right => CellAlignment::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_math_parses_to_a_single_math_node() {
        let tree = parse("$E=mc^2$");
        assert_eq!(tree.len(), 1);
        let Node::Paragraph { children } = &tree[0] else {
            panic!("expected paragraph, got {:?}", tree[0]);
        };
        assert_eq!(children, &[Node::MathInline("E=mc^2".into())]);
    }

    #[test]
    fn display_math_parses_to_a_math_block() {
        let tree = parse("$$\\int_0^\\infty e^{-x^2}dx$$");
        let Node::Paragraph { children } = &tree[0] else {
            panic!("expected paragraph, got {:?}", tree[0]);
        };
        assert_eq!(
            children,
            &[Node::MathBlock("\\int_0^\\infty e^{-x^2}dx".into())]
        );
    }

    #[test]
    fn unterminated_math_degrades_to_literal_text() {
        let tree = parse("$unterminated");
        assert!(!tree.is_empty());
        let flat = collect_text(&tree);
        assert!(flat.contains("unterminated"));
        let Node::Paragraph { children } = &tree[0] else {
            panic!("expected paragraph, got {:?}", tree[0]);
        };
        assert!(children.iter().all(|n| n.kind() != crate::NodeKind::MathInline));
    }

    #[test]
    fn unclosed_fence_still_yields_a_code_block() {
        let tree = parse("```rust\nfn main() {}\n");
        assert!(matches!(
            &tree[0],
            Node::CodeBlock { language: Some(lang), .. } if lang == "rust"
        ));
    }

    #[test]
    fn heading_levels_carry_through() {
        let tree = parse("# one\n\n###### six");
        assert!(matches!(&tree[0], Node::Heading { level: 1, .. }));
        assert!(matches!(&tree[1], Node::Heading { level: 6, .. }));
    }

    #[test]
    fn ordered_flag_reaches_list_items() {
        let tree = parse("1. first\n2. second\n");
        let Node::List { ordered, start, children } = &tree[0] else {
            panic!("expected list, got {:?}", tree[0]);
        };
        assert!(*ordered);
        assert_eq!(*start, Some(1));
        assert!(children
            .iter()
            .all(|item| matches!(item, Node::ListItem { ordered: true, .. })));

        let tree = parse("- milk\n- bread\n");
        assert!(matches!(&tree[0], Node::List { ordered: false, .. }));
    }

    #[test]
    fn table_rows_split_into_header_and_body() {
        let tree = parse("| Name | Score |\n|:-----|------:|\n| Alice | 95 |\n");
        let Node::Table { children } = &tree[0] else {
            panic!("expected table, got {:?}", tree[0]);
        };
        let Node::TableRow { header: true, children: head } = &children[0] else {
            panic!("expected header row, got {:?}", children[0]);
        };
        assert!(matches!(
            head[0],
            Node::TableCell { header: true, alignment: CellAlignment::Left, .. }
        ));
        assert!(matches!(
            head[1],
            Node::TableCell { header: true, alignment: CellAlignment::Right, .. }
        ));
        assert!(matches!(&children[1], Node::TableRow { header: false, .. }));
    }

    #[test]
    fn malformed_table_degrades_to_text() {
        let tree = parse("| not | a table\njust text\n");
        assert!(!tree.is_empty());
        assert!(collect_text(&tree).contains("not"));
    }

    #[test]
    fn image_collects_alt_and_src() {
        let tree = parse("![cat pic](/uploads/cat-pic.jpg)");
        let Node::Paragraph { children } = &tree[0] else {
            panic!("expected paragraph, got {:?}", tree[0]);
        };
        assert_eq!(
            children[0],
            Node::Image {
                alt: "cat pic".into(),
                src: "/uploads/cat-pic.jpg".into(),
                title: String::new(),
            }
        );
    }

    #[test]
    fn raw_html_degrades_to_literal_text() {
        let tree = parse("<div>hi</div>\n");
        assert!(collect_text(&tree).contains("<div>hi</div>"));
        fn no_html_nodes(nodes: &[Node]) -> bool {
            nodes
                .iter()
                .all(|n| matches!(n, Node::Text(_)) || no_html_nodes(n.children()))
        }
        assert!(no_html_nodes(&tree));
    }

    #[test]
    fn flattening_preserves_source_order() {
        let tree = parse("# Alpha\n\nBeta `gamma` $delta$\n\n```\nepsilon\n```\n");
        let flat = collect_text(&tree);
        let positions: Vec<usize> = ["Alpha", "Beta", "gamma", "delta", "epsilon"]
            .iter()
            .map(|needle| flat.find(needle).expect(needle))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn parsing_is_deterministic() {
        let text = "# A\n\n- one\n- two\n\n$x$\n";
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn empty_input_yields_an_empty_tree() {
        assert!(parse("").is_empty());
    }
}
