//! MDX Parser
//!
//! Parses the token stream from `mdx-lexer` into a list of [`Component`]s.
//! Malformed constructs never fail: they degrade to literal text. The only error
//! is a malformed `{ .key=value }` property block.

pub mod ast;
pub mod parser;

pub use ast::{Component, Layout, Property};
pub use parser::Parser;

/// Parser error. Raised only by malformed property blocks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Parse error: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parse MDX source into its top-level components.
pub fn parse(source: &str) -> Result<Vec<Component>, ParseError> {
    Parser::parse(source)
}
