//! Serializing an instruction tree to HTML.

use pulldown_cmark_escape::{StrWrite, escape_href, escape_html, escape_html_body_text};

use crate::instruction::RenderInstruction;

/// Elements with no closing tag.
fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "br" | "hr" | "input")
}

/// Block-level tags get a trailing newline so the output stays readable.
fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "ol"
            | "ul"
            | "li"
            | "blockquote"
            | "table"
            | "tr"
            | "pre"
            | "hr"
    )
}

struct HtmlWriter<W> {
    writer: W,
}

impl<W: StrWrite> HtmlWriter<W> {
    fn run(&mut self, instructions: &[RenderInstruction]) -> Result<(), W::Error> {
        for instruction in instructions {
            self.instruction(instruction)?;
        }
        Ok(())
    }

    fn instruction(&mut self, instruction: &RenderInstruction) -> Result<(), W::Error> {
        match instruction {
            RenderInstruction::Text(text) => escape_html_body_text(&mut self.writer, text),
            RenderInstruction::Raw(html) => self.writer.write_str(html),
            RenderInstruction::Element {
                tag,
                attrs,
                children,
            } => {
                self.writer.write_str("<")?;
                self.writer.write_str(tag)?;
                for (name, value) in attrs {
                    self.writer.write_str(" ")?;
                    self.writer.write_str(name)?;
                    self.writer.write_str("=\"")?;
                    // URL-valued attributes take the stricter href escaping.
                    if matches!(*name, "href" | "src") {
                        escape_href(&mut self.writer, value)?;
                    } else {
                        escape_html(&mut self.writer, value)?;
                    }
                    self.writer.write_str("\"")?;
                }
                if is_void(tag) {
                    self.writer.write_str(" />")?;
                } else {
                    self.writer.write_str(">")?;
                    self.run(children)?;
                    self.writer.write_str("</")?;
                    self.writer.write_str(tag)?;
                    self.writer.write_str(">")?;
                }
                if is_block(tag) {
                    self.writer.write_str("\n")?;
                }
                Ok(())
            }
        }
    }
}

/// Appends the serialized tree to `out`.
pub fn push_html(out: &mut String, instructions: &[RenderInstruction]) {
    HtmlWriter { writer: out }
        .run(instructions)
        .expect("writing to a String does not fail");
}

/// Serializes the tree to a fresh string.
pub fn write_html(instructions: &[RenderInstruction]) -> String {
    let mut out = String::new();
    push_html(&mut out, instructions);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_is_escaped() {
        let out = write_html(&[RenderInstruction::element(
            "p",
            vec![RenderInstruction::text("<script>alert(1)</script>")],
        )]);
        assert!(out.starts_with("<p>"));
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script"));
    }

    #[test]
    fn attributes_are_escaped() {
        let out = write_html(&[RenderInstruction::element("p", Vec::new())
            .with_attr("title", "a\"b")]);
        assert!(out.contains("title=\"a&quot;b\""));
    }

    #[test]
    fn void_elements_do_not_close() {
        let out = write_html(&[RenderInstruction::element("img", Vec::new())
            .with_attr("src", "/uploads/cat.jpg")
            .with_attr("alt", "cat")]);
        assert_eq!(out, "<img src=\"/uploads/cat.jpg\" alt=\"cat\" />");
    }

    #[test]
    fn raw_markup_passes_through_verbatim() {
        let out = write_html(&[RenderInstruction::Raw("<math>x</math>".into())]);
        assert_eq!(out, "<math>x</math>");
    }
}
