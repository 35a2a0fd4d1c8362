//! MDX Lexer
//!
//! Tokenizes MDX source into a flat stream of tokens: one token per punctuation
//! character, whitespace classes, list markers and words.
//! Tokens carry no position information.
//!
//! # Example
//!
//! ```
//! use mdx_lexer::Lexer;
//!
//! let tokens = Lexer::tokenize("");
//! assert_eq!(tokens.len(), 1); // Just EOF
//! ```

pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};
