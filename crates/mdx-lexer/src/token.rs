/// Token classification for MDX source.
///
/// Punctuation kinds map 1:1 to a single source character. `ListMarker` and `Word`
/// carry their text in the token's `literal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural punctuation
    Hash,       // #
    LBrace,     // {
    RBrace,     // }
    LParen,     // (
    RParen,     // )
    LBracket,   // [
    RBracket,   // ]
    Bang,       // !
    Backtick,   // `
    Asterisk,   // *
    Lt,         // <
    Gt,         // >
    Dot,        // .
    Dash,       // -
    Underscore, // _
    Slash,      // /
    Backslash,  // \
    At,         // @
    Equals,     // =
    Tilde,      // ~
    Dollar,     // $
    Caret,      // ^

    // Whitespace
    Space,
    Tab,
    Newline,

    // Digits followed by `.` at the start of a line
    ListMarker,

    // Maximal run of ordinary characters
    Word,

    // End of input
    Eof,
}

impl TokenKind {
    /// Map a single punctuation character to its token kind.
    pub fn from_punctuation(ch: char) -> Option<Self> {
        let kind = match ch {
            '#' => TokenKind::Hash,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '!' => TokenKind::Bang,
            '`' => TokenKind::Backtick,
            '*' => TokenKind::Asterisk,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Dash,
            '_' => TokenKind::Underscore,
            '/' => TokenKind::Slash,
            '\\' => TokenKind::Backslash,
            '@' => TokenKind::At,
            '=' => TokenKind::Equals,
            '~' => TokenKind::Tilde,
            '$' => TokenKind::Dollar,
            '^' => TokenKind::Caret,
            _ => return None,
        };
        Some(kind)
    }

    /// Space, tab or newline.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Space | TokenKind::Tab | TokenKind::Newline)
    }
}

/// A token produced by the MDX lexer.
///
/// Tabs and newlines keep an escaped literal (`"\\t"`, `"\\n"`) so that they can be
/// told apart from the characters appearing inside words. Use [`Token::text`] to get
/// the source text back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "")
    }

    /// The source text this token was read from.
    pub fn text(&self) -> &str {
        match self.kind {
            TokenKind::Tab => "\t",
            TokenKind::Newline => "\n",
            _ => &self.literal,
        }
    }
}

/// Characters that end a word so a delimiter written right after text
/// (`word]`, `word*`) is tokenized on its own.
pub const CLOSING_PAIRS: &[char] = &[']', ')', '>', '*', '`', '$', '^', '}'];

/// Check if a character terminates a word token.
pub fn is_closing_pair(ch: char) -> bool {
    CLOSING_PAIRS.contains(&ch)
}
