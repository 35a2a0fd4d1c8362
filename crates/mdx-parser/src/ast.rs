//! Abstract Syntax Tree for MDX.
//!
//! A document is an ordered list of [`Component`]s. Every variant owns its children
//! exclusively and is immutable once the parser has built it.

use serde::Serialize;

/// One HTML attribute, written in source as `.name=value` inside a `{ ... }` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Layout classification of a component, fixed per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Layout {
    Block,
    Inline,
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Component {
    /// Literal text, also the fallback for malformed constructs.
    Fragment(Fragment),

    /// `<br/>` between continued blockquote lines.
    LineBreak,

    /// `# Title` through `###### Title`.
    Header(Header),

    /// A run of prose and inline constructs.
    Paragraph(Paragraph),

    /// `` `code` ``
    Code(Code),

    /// `**bold**`
    Bold(Bold),

    /// `*italic*`
    Italic(Italic),

    /// `> quote`, nesting by marker count.
    BlockQuote(BlockQuote),

    /// `1. item`
    OrderedList(OrderedList),

    /// `- item`
    UnorderedList(UnorderedList),

    /// `![alt](url)`
    Image(Image),

    /// `---` or `___`
    HorizontalRule(HorizontalRule),

    /// `[label](url)` or `<url>`
    Link(Link),

    /// `~[label](handler)`
    Button(Button),

    /// `[ ... ]`
    Div(Div),

    /// `@ ... @`
    Nav(Nav),

    /// `$ text $`
    Span(Span),

    /// `^^ ... ^^`
    CodeBlock(CodeBlock),
}

impl Component {
    /// Block or inline layout. Depends on the variant only.
    pub fn layout(&self) -> Layout {
        match self {
            Component::Fragment(_)
            | Component::Paragraph(_)
            | Component::Code(_)
            | Component::Bold(_)
            | Component::Italic(_)
            | Component::Link(_)
            | Component::Span(_) => Layout::Inline,
            Component::LineBreak
            | Component::Header(_)
            | Component::BlockQuote(_)
            | Component::OrderedList(_)
            | Component::UnorderedList(_)
            | Component::Image(_)
            | Component::HorizontalRule(_)
            | Component::Button(_)
            | Component::Div(_)
            | Component::Nav(_)
            | Component::CodeBlock(_) => Layout::Block,
        }
    }

    pub fn is_block(&self) -> bool {
        self.layout() == Layout::Block
    }

    pub fn is_inline(&self) -> bool {
        self.layout() == Layout::Inline
    }

    /// Shorthand for a text fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Component::Fragment(Fragment { text: text.into() })
    }

    /// Attributes of this component. `Fragment` and `LineBreak` have none.
    pub fn properties(&self) -> &[Property] {
        match self {
            Component::Fragment(_) | Component::LineBreak => &[],
            Component::Header(c) => &c.properties,
            Component::Paragraph(c) => &c.properties,
            Component::Code(c) => &c.properties,
            Component::Bold(c) => &c.properties,
            Component::Italic(c) => &c.properties,
            Component::BlockQuote(c) => &c.properties,
            Component::OrderedList(c) => &c.properties,
            Component::UnorderedList(c) => &c.properties,
            Component::Image(c) => &c.properties,
            Component::HorizontalRule(c) => &c.properties,
            Component::Link(c) => &c.properties,
            Component::Button(c) => &c.properties,
            Component::Div(c) => &c.properties,
            Component::Nav(c) => &c.properties,
            Component::Span(c) => &c.properties,
            Component::CodeBlock(c) => &c.properties,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub level: u8,
    pub properties: Vec<Property>,
    pub content: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub properties: Vec<Property>,
    pub content: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Code {
    pub properties: Vec<Property>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bold {
    pub properties: Vec<Property>,
    pub content: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Italic {
    pub properties: Vec<Property>,
    pub content: Vec<Component>,
}

/// Nested quotes appear as `BlockQuote` entries in `content`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockQuote {
    pub properties: Vec<Property>,
    pub content: Vec<Component>,
}

/// One `<li>`, holding exactly one child.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub properties: Vec<Property>,
    pub component: Box<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderedList {
    pub properties: Vec<Property>,
    pub items: Vec<ListItem>,
    pub start: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnorderedList {
    pub properties: Vec<Property>,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub properties: Vec<Property>,
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizontalRule {
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub properties: Vec<Property>,
    pub url: String,
    pub content: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    pub properties: Vec<Property>,
    pub on_click: String,
    pub content: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Div {
    pub properties: Vec<Property>,
    pub children: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nav {
    pub properties: Vec<Property>,
    pub children: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub properties: Vec<Property>,
    pub content: Vec<Component>,
}

/// Fenced code. `text` holds real newlines; tabs are already expanded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBlock {
    pub properties: Vec<Property>,
    pub text: String,
}
