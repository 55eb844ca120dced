//! End-to-end pipeline coverage: text in, instruction tree / HTML out.

use vellum_renderer::{Pipeline, RenderInstruction};

fn find_by_tag<'a>(
    instructions: &'a [RenderInstruction],
    tag: &str,
) -> Option<&'a RenderInstruction> {
    for instruction in instructions {
        if instruction.tag() == Some(tag) {
            return Some(instruction);
        }
        if let RenderInstruction::Element { children, .. } = instruction {
            if let Some(found) = find_by_tag(children, tag) {
                return Some(found);
            }
        }
    }
    None
}

#[test]
fn any_input_renders_to_a_finite_tree() {
    let pipeline = Pipeline::new();
    for input in [
        "",
        "plain",
        "$unterminated",
        "```no closing fence",
        "| broken | table\n|---|\n| x |",
        "$$\nstill open",
    ] {
        let tree = pipeline.render(input);
        let count: usize = tree.iter().map(RenderInstruction::count).sum();
        assert!(count < 10_000, "{input:?}");
        if !input.is_empty() {
            assert!(!tree.is_empty(), "{input:?}");
        }
    }
}

#[test]
fn rendering_twice_yields_identical_trees() {
    let pipeline = Pipeline::new();
    let text = "# Title\n\nBody with $x^2$ and `code`.\n\n- a\n- b\n";
    assert_eq!(pipeline.render(text), pipeline.render(text));
}

#[test]
fn uploaded_image_reference_resolves_to_the_asset_root() {
    let pipeline = Pipeline::new();
    let tree = pipeline.render("![whatever alt text](/uploads/cat-pic.jpg)");
    let img = find_by_tag(&tree, "img").expect("an image instruction");
    assert_eq!(img.attr("src"), Some("/uploads/cat-pic.jpg"));
    assert_eq!(img.attr("alt"), Some("whatever alt text"));
}

#[test]
fn bare_image_names_gain_the_asset_root_prefix() {
    let pipeline = Pipeline::new();
    let tree = pipeline.render("![cat](cat-pic.jpg)");
    let img = find_by_tag(&tree, "img").expect("an image instruction");
    assert_eq!(img.attr("src"), Some("/uploads/cat-pic.jpg"));
}

#[test]
fn absolute_urls_pass_through_unresolved() {
    let pipeline = Pipeline::new();
    let tree = pipeline.render("![remote](https://example.com/a.png)");
    let img = find_by_tag(&tree, "img").expect("an image instruction");
    assert_eq!(img.attr("src"), Some("https://example.com/a.png"));
}

#[test]
fn recognized_language_highlights_while_unknown_stays_monospace() {
    let pipeline = Pipeline::new();

    let tree = pipeline.render("```rust\nfn main() {}\n```");
    assert!(
        matches!(&tree[0], RenderInstruction::Raw(html) if html.contains("<pre")),
        "expected highlighted markup, got {:?}",
        tree[0]
    );

    let tree = pipeline.render("```definitely-not-a-language\nx\n```");
    let pre = find_by_tag(&tree, "pre").expect("a plain code block");
    assert!(find_by_tag(std::slice::from_ref(pre), "code").is_some());

    let tree = pipeline.render("```\nuntagged\n```");
    assert!(find_by_tag(&tree, "pre").is_some());
}

#[test]
fn math_keeps_inline_and_display_modes_apart() {
    let pipeline = Pipeline::new();

    let tree = pipeline.render("$E=mc^2$");
    let span = find_by_tag(&tree, "span").expect("a math span");
    assert_eq!(span.attr("class"), Some("math math-inline"));

    let tree = pipeline.render("$$\\int_0^\\infty e^{-x^2}dx$$");
    let span = find_by_tag(&tree, "span").expect("a math span");
    assert_eq!(span.attr("class"), Some("math math-display"));
}

#[test]
fn table_header_and_body_cells_render_distinctly() {
    let pipeline = Pipeline::new();
    let tree = pipeline.render("| Name | Score |\n|------|------:|\n| Alice | 95 |\n");
    assert!(find_by_tag(&tree, "table").is_some());
    assert!(find_by_tag(&tree, "th").is_some());
    let td = find_by_tag(&tree, "td").expect("a body cell");
    assert!(td.attr("style").is_none());
    let html = pipeline.render_html("| A |\n|--:|\n| 1 |\n");
    assert!(html.contains("<th style=\"text-align: right\">"));
    assert!(html.contains("<td style=\"text-align: right\">"));
}

#[test]
fn render_html_is_presentable_and_escaped() {
    let pipeline = Pipeline::new();
    let html = pipeline.render_html("# Hi\n\nA <b>bold</b> claim.\n");
    assert!(html.contains("<h1>Hi</h1>"));
    assert!(!html.contains("<b>"));
}

#[test]
fn full_document_renders_every_feature_in_order() {
    let pipeline = Pipeline::new();
    let text = "\
# Doc

Some *emphasis* and **strength** with `inline` code and $x$.

```rust
let a = 1;
```

| H |
|---|
| b |

- [ ] open task
- [x] done task

![pic](/uploads/pic.png)
";
    let html = pipeline.render_html(text);
    for needle in [
        "<h1>Doc</h1>",
        "<em>emphasis</em>",
        "<strong>strength</strong>",
        "<code>inline</code>",
        "math math-inline",
        "<th>H</th>",
        "<td>b</td>",
        "type=\"checkbox\"",
        "src=\"/uploads/pic.png\"",
    ] {
        assert!(html.contains(needle), "missing {needle:?} in {html}");
    }
    let h1 = html.find("<h1>").unwrap();
    let table = html.find("<th>").unwrap();
    let img = html.find("<img").unwrap();
    assert!(h1 < table && table < img);
}
