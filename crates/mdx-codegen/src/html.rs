//! Compact HTML generator.
//!
//! Emits the minimal markup for each component: attributes in property order,
//! content concatenated without added whitespace. Lists, containers and code
//! blocks put each child on its own indented line.

use crate::pretty;
use crate::RenderOptions;
use mdx_parser::ast::{CodeBlock, ListItem};
use mdx_parser::{Component, Property};

/// Conversion of a parsed component into HTML.
pub trait ToHtml {
    /// Minimal HTML.
    fn to_html(&self) -> String;

    /// Indented HTML starting at `level`, reflowed to the configured width.
    /// Every emitted line ends with a newline.
    fn to_pretty_html(&self, level: usize, options: &RenderOptions) -> String;
}

impl ToHtml for Component {
    fn to_html(&self) -> String {
        match self {
            Component::Fragment(f) => f.text.clone(),
            Component::LineBreak => "<br/>".to_string(),
            Component::Header(h) => {
                let tag = format!("h{}", h.level);
                wrap(&tag, &h.properties, &inner(&h.content))
            }
            Component::Paragraph(p) => wrap("p", &p.properties, &inner(&p.content)),
            Component::Code(c) => wrap("code", &c.properties, &c.text),
            Component::Bold(b) => wrap("strong", &b.properties, &inner(&b.content)),
            Component::Italic(i) => wrap("em", &i.properties, &inner(&i.content)),
            Component::BlockQuote(q) => wrap("blockquote", &q.properties, &inner(&q.content)),
            Component::OrderedList(list) => format!(
                "<ol start=\"{}\"{}>\n{}</ol>",
                list.start,
                attributes(&list.properties),
                items(&list.items)
            ),
            Component::UnorderedList(list) => format!(
                "<ul{}>\n{}</ul>",
                attributes(&list.properties),
                items(&list.items)
            ),
            Component::Image(img) => format!(
                "<img{} src=\"{}\" alt=\"{}\"/>",
                attributes(&img.properties),
                img.url,
                img.alt
            ),
            Component::HorizontalRule(hr) => format!("<hr{}/>", attributes(&hr.properties)),
            Component::Link(link) => format!(
                "{}{}</a>",
                link_open(&link.properties, &link.url),
                inner(&link.content)
            ),
            Component::Button(button) => format!(
                "{}{}</button>",
                button_open(&button.properties, &button.on_click),
                inner(&button.content)
            ),
            Component::Div(div) => container("div", &div.properties, &div.children),
            Component::Nav(nav) => container("nav", &nav.properties, &nav.children),
            Component::Span(span) => wrap("span", &span.properties, &inner(&span.content)),
            Component::CodeBlock(block) => {
                let mut html = format!("{}\n", code_block_open(block));
                for line in block.text.split('\n') {
                    html.push_str(&format!("    <pre>{line}</pre>\n"));
                }
                html.push_str("</div>");
                html
            }
        }
    }

    fn to_pretty_html(&self, level: usize, options: &RenderOptions) -> String {
        let mut out = String::new();
        pretty::render_component(self, level, options, &mut out);
        out
    }
}

impl ToHtml for ListItem {
    fn to_html(&self) -> String {
        wrap("li", &self.properties, &self.component.to_html())
    }

    fn to_pretty_html(&self, level: usize, options: &RenderOptions) -> String {
        let mut out = String::new();
        pretty::render_list_item(self, level, options, &mut out);
        out
    }
}

// =========================================================================
// Tag helpers, shared with the pretty renderer
// =========================================================================

/// ` name="value"` for each property, in order.
pub fn attributes(properties: &[Property]) -> String {
    properties
        .iter()
        .map(|p| format!(" {}=\"{}\"", p.name, p.value))
        .collect()
}

pub(crate) fn open_tag(tag: &str, properties: &[Property]) -> String {
    format!("<{tag}{}>", attributes(properties))
}

pub(crate) fn link_open(properties: &[Property], url: &str) -> String {
    format!(
        "<a{} href=\"{url}\" target=\"_blank\">",
        attributes(properties)
    )
}

pub(crate) fn button_open(properties: &[Property], on_click: &str) -> String {
    format!("<button{} onclick=\"{on_click}()\">", attributes(properties))
}

/// A user `class` joins the fixed `code-block` class instead of repeating the
/// attribute.
pub(crate) fn code_block_open(block: &CodeBlock) -> String {
    let mut class = String::from("code-block");
    let mut rest = Vec::new();
    for property in &block.properties {
        if property.name == "class" {
            class.push(' ');
            class.push_str(&property.value);
        } else {
            rest.push(property.clone());
        }
    }
    format!("<div class=\"{class}\"{}>", attributes(&rest))
}

/// Compact HTML of a content list.
pub(crate) fn inner(content: &[Component]) -> String {
    content.iter().map(ToHtml::to_html).collect()
}

fn wrap(tag: &str, properties: &[Property], content: &str) -> String {
    format!("{}{content}</{tag}>", open_tag(tag, properties))
}

fn items(items: &[ListItem]) -> String {
    items
        .iter()
        .map(|item| format!("    {}\n", item.to_html()))
        .collect()
}

fn container(tag: &str, properties: &[Property], children: &[Component]) -> String {
    if children.is_empty() {
        return format!("{}</{tag}>", open_tag(tag, properties));
    }

    let mut html = format!("{}\n", open_tag(tag, properties));
    for child in children {
        html.push_str(&format!("    {}\n", child.to_html()));
    }
    html.push_str(&format!("</{tag}>"));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdx_parser::ast::*;
    use pretty_assertions::assert_eq;

    fn html(source: &str) -> String {
        mdx_parser::parse(source)
            .unwrap()
            .iter()
            .map(ToHtml::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }

    // =========================================================================
    // Text
    // =========================================================================

    #[test]
    fn test_fragment() {
        assert_eq!(Component::text("plain").to_html(), "plain");
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(html("Hello world"), "<p>Hello world</p>");
    }

    #[test]
    fn test_headers() {
        assert_eq!(html("### Three"), "<h3>Three</h3>");
        assert_eq!(html("###### Six"), "<h6>Six</h6>");
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(
            html("a **b** *c* `d`"),
            "<p>a <strong>b</strong> <em>c</em> <code>d</code></p>"
        );
    }

    #[test]
    fn test_span() {
        assert_eq!(
            html("Hello, { .class=groovy } $ world $"),
            "<p>Hello, <span class=\"groovy\">world</span></p>"
        );
    }

    // =========================================================================
    // Links, images, buttons
    // =========================================================================

    #[test]
    fn test_link() {
        assert_eq!(
            html("[Docs](https://example.com)"),
            "<a href=\"https://example.com\" target=\"_blank\">Docs</a>"
        );
    }

    #[test]
    fn test_short_link() {
        assert_eq!(
            html("<https://example.com>"),
            "<a href=\"https://example.com\" target=\"_blank\">https://example.com</a>"
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            html("{ .width=40 }\n![Logo](logo.png)"),
            "<img width=\"40\" src=\"logo.png\" alt=\"Logo\"/>"
        );
    }

    #[test]
    fn test_button() {
        assert_eq!(
            html("~[Click Me](handleClick)"),
            "<button onclick=\"handleClick()\"><p>Click Me</p></button>"
        );
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(html("---"), "<hr/>");
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    #[test]
    fn test_blockquote_lines() {
        assert_eq!(
            html("> one\n> two"),
            "<blockquote>one<br/>two</blockquote>"
        );
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            html("- a\n- b"),
            "<ul>\n    <li><p>a</p></li>\n    <li><p>b</p></li>\n</ul>"
        );
    }

    #[test]
    fn test_list_item_properties() {
        assert_eq!(
            html("- {.class=done} a"),
            "<ul>\n    <li class=\"done\"><p>a</p></li>\n</ul>"
        );
    }

    #[test]
    fn test_ordered_list_start() {
        assert_eq!(
            html("3. c"),
            "<ol start=\"3\">\n    <li><p>c</p></li>\n</ol>"
        );
    }

    #[test]
    fn test_nav() {
        assert_eq!(
            html("@\n[Home](/)\n@"),
            "<nav>\n    <a href=\"/\" target=\"_blank\">Home</a>\n</nav>"
        );
    }

    #[test]
    fn test_empty_div() {
        let div = Component::Div(Div {
            properties: vec![Property::new("id", "x")],
            children: Vec::new(),
        });
        assert_eq!(div.to_html(), "<div id=\"x\"></div>");
    }

    #[test]
    fn test_code_block() {
        assert_eq!(
            html("^^\nlet a = 1;\nlet b = 2;\n^^"),
            "<div class=\"code-block\">\n    <pre>let a = 1;</pre>\n    <pre>let b = 2;</pre>\n</div>"
        );
    }

    #[test]
    fn test_code_block_class_merges() {
        assert_eq!(
            html("{ .class=rust .id=main }\n^^\nx\n^^"),
            "<div class=\"code-block rust\" id=\"main\">\n    <pre>x</pre>\n</div>"
        );
    }

    #[test]
    fn test_line_break() {
        assert_eq!(Component::LineBreak.to_html(), "<br/>");
    }
}
