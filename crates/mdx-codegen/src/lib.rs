//! MDX Code Generator
//!
//! Renders the MDX component tree to HTML, either compact (minimal whitespace)
//! or pretty (one block per line, indented, long text reflowed to a line width).
//!
//! ```text
//! source → mdx_parser::parse() → [Component] → render() → HTML body fragment
//! ```
//!
//! [`document`] wraps a rendered body in a full HTML document and writes it to disk.

pub mod document;
pub mod html;
pub mod pretty;

pub use document::{assemble_document, generate_file, output_path, DocumentConfig, GenerateError};
pub use html::ToHtml;

use mdx_parser::{Component, ParseError};

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// Indented, one block per line, text reflowed to `line_width`.
    #[default]
    Pretty,
    /// Minimal markup, one top-level component per line.
    Compact,
}

/// Renderer settings. Passed explicitly to every entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Maximum line length in characters, indentation included.
    pub line_width: usize,
    /// One level of indentation.
    pub indent: String,
    pub style: Style,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_width: 120,
            indent: "    ".to_string(),
            style: Style::Pretty,
        }
    }
}

impl RenderOptions {
    pub fn compact() -> Self {
        Self {
            style: Style::Compact,
            ..Self::default()
        }
    }

    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }
}

/// Error from the source-to-HTML pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Render components as an HTML body fragment.
pub fn render(components: &[Component], options: &RenderOptions) -> String {
    match options.style {
        Style::Compact => components
            .iter()
            .map(ToHtml::to_html)
            .collect::<Vec<_>>()
            .join("\n"),
        Style::Pretty => components
            .iter()
            .map(|c| c.to_pretty_html(0, options))
            .collect(),
    }
}

/// Transform MDX source into pretty HTML with the default options.
pub fn transform(source: &str) -> Result<String, TransformError> {
    transform_with(source, &RenderOptions::default())
}

/// Transform MDX source into HTML.
pub fn transform_with(source: &str, options: &RenderOptions) -> Result<String, TransformError> {
    let components = mdx_parser::parse(source)?;
    Ok(render(&components, options))
}
