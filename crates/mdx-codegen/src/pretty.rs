//! Indented HTML generator with line reflow.
//!
//! Blocks open and close on their own lines, children one level deeper. A run
//! of inline content that fits on the line with its tags is emitted compactly;
//! otherwise it is broken into words at the whitespace of its text and greedily
//! wrapped at the next indentation level. Tags stick to the text beside them.
//! Reflow only moves whitespace: the markup is the same as the compact rendering.

use crate::html::{attributes, button_open, code_block_open, inner, link_open, open_tag, ToHtml};
use crate::RenderOptions;
use mdx_parser::ast::ListItem;
use mdx_parser::{Component, Property};

pub(crate) fn render_component(
    component: &Component,
    level: usize,
    options: &RenderOptions,
    out: &mut String,
) {
    match component {
        Component::Fragment(_) | Component::Code(_) => {
            wrap_inline(std::slice::from_ref(component), level, options, out);
        }
        Component::LineBreak | Component::Image(_) | Component::HorizontalRule(_) => {
            push_line(&component.to_html(), level, options, out);
        }
        Component::Header(h) => {
            let tag = format!("h{}", h.level);
            let open = open_tag(&tag, &h.properties);
            render_text_block(&open, &format!("</{tag}>"), &h.content, level, options, out);
        }
        Component::Paragraph(p) => {
            let open = open_tag("p", &p.properties);
            render_text_block(&open, "</p>", &p.content, level, options, out);
        }
        Component::Bold(b) => {
            let open = open_tag("strong", &b.properties);
            render_text_block(&open, "</strong>", &b.content, level, options, out);
        }
        Component::Italic(i) => {
            let open = open_tag("em", &i.properties);
            render_text_block(&open, "</em>", &i.content, level, options, out);
        }
        Component::Span(s) => {
            let open = open_tag("span", &s.properties);
            render_text_block(&open, "</span>", &s.content, level, options, out);
        }
        Component::BlockQuote(q) => {
            let open = open_tag("blockquote", &q.properties);
            render_text_block(&open, "</blockquote>", &q.content, level, options, out);
        }
        Component::Link(link) => {
            let open = link_open(&link.properties, &link.url);
            render_text_block(&open, "</a>", &link.content, level, options, out);
        }
        Component::Button(button) => {
            let open = button_open(&button.properties, &button.on_click);
            render_text_block(&open, "</button>", &button.content, level, options, out);
        }
        Component::OrderedList(list) => {
            let open = format!("<ol start=\"{}\"{}>", list.start, attributes(&list.properties));
            render_list(&open, "</ol>", &list.items, level, options, out);
        }
        Component::UnorderedList(list) => {
            let open = open_tag("ul", &list.properties);
            render_list(&open, "</ul>", &list.items, level, options, out);
        }
        Component::Div(div) => {
            render_container("div", &div.properties, &div.children, level, options, out);
        }
        Component::Nav(nav) => {
            render_container("nav", &nav.properties, &nav.children, level, options, out);
        }
        Component::CodeBlock(block) => {
            push_line(&code_block_open(block), level, options, out);
            for line in block.text.split('\n') {
                push_line(&format!("<pre>{line}</pre>"), level + 1, options, out);
            }
            push_line("</div>", level, options, out);
        }
    }
}

pub(crate) fn render_list_item(
    item: &ListItem,
    level: usize,
    options: &RenderOptions,
    out: &mut String,
) {
    let open = open_tag("li", &item.properties);
    render_text_block(
        &open,
        "</li>",
        std::slice::from_ref(&*item.component),
        level,
        options,
        out,
    );
}

/// An element whose content mixes text and blocks.
fn render_text_block(
    open: &str,
    close: &str,
    content: &[Component],
    level: usize,
    options: &RenderOptions,
    out: &mut String,
) {
    if content.iter().all(Component::is_inline) {
        let buffer = inner(content);
        let width = line_len(&indent(level, options))
            + line_len(open)
            + line_len(&buffer)
            + line_len(close);
        if width <= options.line_width {
            push_line(&format!("{open}{buffer}{close}"), level, options, out);
            return;
        }
    }

    push_line(open, level, options, out);
    let mut run = 0;
    for (i, child) in content.iter().enumerate() {
        if !child.is_inline() {
            wrap_inline(&content[run..i], level + 1, options, out);
            render_component(child, level + 1, options, out);
            run = i + 1;
        }
    }
    wrap_inline(&content[run..], level + 1, options, out);
    push_line(close, level, options, out);
}

fn render_list(
    open: &str,
    close: &str,
    items: &[ListItem],
    level: usize,
    options: &RenderOptions,
    out: &mut String,
) {
    push_line(open, level, options, out);
    for item in items {
        render_list_item(item, level + 1, options, out);
    }
    push_line(close, level, options, out);
}

fn render_container(
    tag: &str,
    properties: &[Property],
    children: &[Component],
    level: usize,
    options: &RenderOptions,
    out: &mut String,
) {
    let open = open_tag(tag, properties);
    if children.is_empty() {
        push_line(&format!("{open}</{tag}>"), level, options, out);
        return;
    }

    push_line(&open, level, options, out);
    for child in children {
        render_component(child, level + 1, options, out);
    }
    push_line(&format!("</{tag}>"), level, options, out);
}

// =========================================================================
// Reflow
// =========================================================================

/// Greedy word wrap of inline content at `level`. Lines never exceed the width
/// unless a single word is longer than the room left after indentation.
pub fn wrap_inline(
    content: &[Component],
    level: usize,
    options: &RenderOptions,
    out: &mut String,
) {
    let budget = options
        .line_width
        .saturating_sub(line_len(&indent(level, options)));

    let mut line = String::new();
    let mut len = 0;
    for word in inline_words(content) {
        let word_len = line_len(&word);
        if !line.is_empty() && len + 1 + word_len > budget {
            push_line(&line, level, options, out);
            line.clear();
            len = 0;
        }
        if !line.is_empty() {
            line.push(' ');
            len += 1;
        }
        line.push_str(&word);
        len += word_len;
    }

    if !line.is_empty() {
        push_line(&line, level, options, out);
    }
}

/// Compact HTML of inline content cut at the whitespace of its text. Markup
/// never contains a break: tags attach to the neighbouring word.
pub fn inline_words(content: &[Component]) -> Vec<String> {
    let mut words = Words::default();
    for component in content {
        words.component(component);
    }
    words.words
}

#[derive(Default)]
struct Words {
    words: Vec<String>,
    /// The next piece continues the last word.
    glue: bool,
}

impl Words {
    fn component(&mut self, component: &Component) {
        match component {
            Component::Fragment(f) => self.text(&f.text),
            Component::Code(c) => {
                self.attach(&open_tag("code", &c.properties));
                self.text(&c.text);
                self.attach("</code>");
            }
            Component::Paragraph(p) => {
                self.tagged(&open_tag("p", &p.properties), "</p>", &p.content);
            }
            Component::Bold(b) => {
                self.tagged(&open_tag("strong", &b.properties), "</strong>", &b.content);
            }
            Component::Italic(i) => {
                self.tagged(&open_tag("em", &i.properties), "</em>", &i.content);
            }
            Component::Span(s) => {
                self.tagged(&open_tag("span", &s.properties), "</span>", &s.content);
            }
            Component::Link(link) => {
                self.tagged(&link_open(&link.properties, &link.url), "</a>", &link.content);
            }
            other => self.attach(&other.to_html()),
        }
    }

    fn tagged(&mut self, open: &str, close: &str, content: &[Component]) {
        self.attach(open);
        for child in content {
            self.component(child);
        }
        self.attach(close);
    }

    fn text(&mut self, text: &str) {
        for (i, piece) in text.split([' ', '\n', '\t']).enumerate() {
            if i > 0 {
                self.glue = false;
            }
            if !piece.is_empty() {
                self.attach(piece);
            }
        }
    }

    fn attach(&mut self, piece: &str) {
        match self.words.last_mut() {
            Some(last) if self.glue => last.push_str(piece),
            _ => self.words.push(piece.to_string()),
        }
        self.glue = true;
    }
}

fn indent(level: usize, options: &RenderOptions) -> String {
    options.indent.repeat(level)
}

fn line_len(text: &str) -> usize {
    text.chars().count()
}

fn push_line(text: &str, level: usize, options: &RenderOptions, out: &mut String) {
    out.push_str(&indent(level, options));
    out.push_str(text);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdx_parser::ast::Link;
    use pretty_assertions::assert_eq;

    fn pretty(source: &str) -> String {
        pretty_with(source, &RenderOptions::default())
    }

    fn pretty_with(source: &str, options: &RenderOptions) -> String {
        crate::render(&mdx_parser::parse(source).unwrap(), options)
    }

    // =========================================================================
    // Layout
    // =========================================================================

    #[test]
    fn test_header() {
        assert_eq!(pretty("# Heading"), "<h1>Heading</h1>\n");
    }

    #[test]
    fn test_div_indents_children() {
        assert_eq!(
            pretty("[\n# Title\nSome text\n]"),
            "<div>\n    <h1>Title</h1>\n    <p>Some text</p>\n</div>\n"
        );
    }

    #[test]
    fn test_nested_containers() {
        assert_eq!(
            pretty("[\n@\n[Home](/)\n@\n]"),
            "<div>\n    <nav>\n        <a href=\"/\" target=\"_blank\">Home</a>\n    </nav>\n</div>\n"
        );
    }

    #[test]
    fn test_list() {
        assert_eq!(
            pretty("1. First\n2. Second"),
            "<ol start=\"1\">\n    <li><p>First</p></li>\n    <li><p>Second</p></li>\n</ol>\n"
        );
    }

    #[test]
    fn test_nested_quote_is_indented() {
        assert_eq!(
            pretty("> a\n> > b"),
            "<blockquote>\n    a\n    <blockquote>b</blockquote>\n</blockquote>\n"
        );
    }

    #[test]
    fn test_quote_line_breaks() {
        assert_eq!(
            pretty("> one\n> two"),
            "<blockquote>\n    one\n    <br/>\n    two\n</blockquote>\n"
        );
    }

    #[test]
    fn test_code_block() {
        assert_eq!(
            pretty("[\n^^\na\n\tb\n^^\n]"),
            "<div>\n    <div class=\"code-block\">\n        <pre>a</pre>\n        <pre>    b</pre>\n    </div>\n</div>\n"
        );
    }

    #[test]
    fn test_image_and_rule() {
        assert_eq!(
            pretty("![A](a.png)\n---"),
            "<img src=\"a.png\" alt=\"A\"/>\n<hr/>\n"
        );
    }

    #[test]
    fn test_custom_indent() {
        let options = RenderOptions {
            indent: "  ".to_string(),
            ..RenderOptions::default()
        };
        assert_eq!(
            pretty_with("[\nx\n]", &options),
            "<div>\n  <p>x</p>\n</div>\n"
        );
    }

    // =========================================================================
    // Reflow
    // =========================================================================

    #[test]
    fn test_long_paragraph_wraps() {
        let options = RenderOptions::default().with_line_width(20);
        assert_eq!(
            pretty_with("one two three four five six", &options),
            "<p>\n    one two three\n    four five six\n</p>\n"
        );
    }

    #[test]
    fn test_wrap_keeps_tags_whole() {
        let options = RenderOptions::default().with_line_width(30);
        let html = pretty_with("see [the docs](https://example.com/docs) now", &options);
        assert!(
            html.contains("<a href=\"https://example.com/docs\" target=\"_blank\">the"),
            "{html}"
        );
    }

    #[test]
    fn test_reflow_matches_compact_markup() {
        let source = "Some **bold** words and a [link](/x) inside a fairly long paragraph of prose text";
        let options = RenderOptions::default().with_line_width(24);
        let pretty = pretty_with(source, &options);
        let compact = crate::render(&mdx_parser::parse(source).unwrap(), &RenderOptions::compact());
        let squash = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        assert_eq!(squash(&pretty), squash(&compact));
    }

    #[test]
    fn test_lines_fit_width() {
        let word = "lorem ipsum dolor sit amet consectetur adipiscing elit ";
        let source = format!(
            "[\n> {}\n\nif a < b then {} and **bold text** {}\n]",
            word.repeat(8),
            word.repeat(10),
            word.repeat(4)
        );
        for width in [40, 80, 120] {
            let options = RenderOptions::default().with_line_width(width);
            for line in pretty_with(&source, &options).lines() {
                let len = line.chars().count();
                let single_word = !line.trim().contains(' ');
                assert!(len <= width || single_word, "{width}: {line:?}");
            }
        }
    }

    #[test]
    fn test_overlong_word_kept_whole() {
        let long = "x".repeat(50);
        let mut out = String::new();
        let options = RenderOptions::default().with_line_width(20);
        wrap_inline(&[Component::text(format!("a {long} b"))], 0, &options, &mut out);
        assert_eq!(out, format!("a\n{long}\nb\n"));
    }

    #[test]
    fn test_width_counts_chars() {
        // 15 chars, 29 bytes.
        let mut out = String::new();
        let options = RenderOptions::default().with_line_width(16);
        wrap_inline(&[Component::text("ééééééé ééééééé")], 0, &options, &mut out);
        assert_eq!(out, "ééééééé ééééééé\n");
    }

    #[test]
    fn test_inline_words() {
        let content = vec![
            Component::text("a "),
            Component::Link(Link {
                properties: vec![Property::new("title", "x y")],
                url: "/u".into(),
                content: vec![Component::text("b c")],
            }),
            Component::text("  d"),
        ];
        assert_eq!(
            inline_words(&content),
            vec![
                "a",
                "<a title=\"x y\" href=\"/u\" target=\"_blank\">b",
                "c</a>",
                "d"
            ]
        );
    }

    #[test]
    fn test_literal_angle_bracket_is_a_word() {
        assert_eq!(
            inline_words(&[Component::text("if a < b then c > d")]),
            vec!["if", "a", "<", "b", "then", "c", ">", "d"]
        );
    }

    #[test]
    fn test_literal_angle_bracket_wraps() {
        let source = format!("if a < b then {}", "word ".repeat(40));
        let html = pretty(&source);
        for line in html.lines() {
            assert!(line.chars().count() <= 120, "{line:?}");
        }
        assert!(html.lines().count() > 3, "{html}");
    }
}
