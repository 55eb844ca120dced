//! LaTeX math typesetting via pulldown-latex → MathML.

use pulldown_latex::{
    Parser, Storage,
    config::{DisplayMode, RenderConfig},
    mathml::push_mathml,
};

use crate::instruction::RenderInstruction;

/// Typesets `latex` (without its `$` delimiters) into a render instruction.
///
/// Inline and display mode are kept distinct so the consumer can lay the
/// result out accordingly. Invalid LaTeX never fails the render pass: it
/// degrades to a `math-error` span carrying the source.
pub fn typeset(latex: &str, display: bool) -> RenderInstruction {
    let storage = Storage::new();
    let parser = Parser::new(latex, &storage);
    let config = RenderConfig {
        display_mode: if display {
            DisplayMode::Block
        } else {
            DisplayMode::Inline
        },
        ..Default::default()
    };

    let events: Vec<_> = parser.collect();
    if events.iter().any(Result::is_err) {
        let message = events
            .iter()
            .filter_map(|e| e.as_ref().err().map(ToString::to_string))
            .collect::<Vec<_>>()
            .join("; ");
        return error_span(latex, &message, display);
    }

    let mut mathml = String::new();
    match push_mathml(&mut mathml, events.into_iter(), config) {
        Ok(()) => wrapper(display, vec![RenderInstruction::Raw(mathml)]),
        Err(err) => error_span(latex, &err.to_string(), display),
    }
}

fn wrapper(display: bool, children: Vec<RenderInstruction>) -> RenderInstruction {
    let class = if display {
        "math math-display"
    } else {
        "math math-inline"
    };
    RenderInstruction::element("span", children).with_attr("class", class)
}

fn error_span(latex: &str, message: &str, display: bool) -> RenderInstruction {
    let mode_class = if display {
        "math math-error math-display"
    } else {
        "math math-error math-inline"
    };
    RenderInstruction::element(
        "span",
        vec![RenderInstruction::element(
            "code",
            vec![RenderInstruction::text(latex)],
        )],
    )
    .with_attr("class", mode_class)
    .with_attr("title", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_math_typesets_to_mathml() {
        let out = typeset("x^2", false);
        assert_eq!(out.attr("class"), Some("math math-inline"));
        let RenderInstruction::Element { children, .. } = &out else {
            panic!("expected element, got {out:?}");
        };
        let RenderInstruction::Raw(mathml) = &children[0] else {
            panic!("expected raw mathml, got {:?}", children[0]);
        };
        assert!(mathml.contains("<math"));
    }

    #[test]
    fn display_math_keeps_its_mode() {
        let out = typeset(r"\frac{a}{b}", true);
        assert_eq!(out.attr("class"), Some("math math-display"));
    }

    #[test]
    fn invalid_latex_degrades_to_an_error_span() {
        let out = typeset(r"\frac{a", false);
        let class = out.attr("class").unwrap();
        assert!(class.contains("math-error"));
        assert!(out.attr("title").is_some());
    }
}
