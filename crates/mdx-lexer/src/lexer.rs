use crate::token::{is_closing_pair, Token, TokenKind};

/// MDX source lexer.
///
/// Walks the source with a single forward cursor and one character of peek.
/// The only state besides the cursor is the kind of the previously emitted token,
/// which decides whether `1.` is a list marker (start of a line) or prose.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    prev: Option<TokenKind>,
}

impl Lexer {
    /// Create a new lexer for the given source.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            prev: None,
        }
    }

    /// Tokenize the entire source. The last token is always `Eof`.
    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();

        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// Read the next token. Keeps returning `Eof` once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan_token();
        self.prev = Some(token.kind);
        token
    }

    fn scan_token(&mut self) -> Token {
        if self.is_at_end() {
            return Token::eof();
        }

        let ch = self.peek();

        match ch {
            ' ' => {
                self.advance();
                Token::new(TokenKind::Space, " ")
            }
            '\t' => {
                self.advance();
                Token::new(TokenKind::Tab, "\\t")
            }
            '\n' => {
                self.advance();
                Token::new(TokenKind::Newline, "\\n")
            }
            '\r' => {
                self.advance();
                // Handle \r\n as single newline
                if self.peek() == '\n' {
                    self.advance();
                }
                Token::new(TokenKind::Newline, "\\n")
            }
            '0'..='9' => self.scan_number(),
            _ => match TokenKind::from_punctuation(ch) {
                Some(kind) => {
                    self.advance();
                    Token::new(kind, ch.to_string())
                }
                None => self.scan_word(String::new()),
            },
        }
    }

    // --- Scanners ---

    /// Scan a digit run. At the start of a line `<digits>.` is a list marker,
    /// anywhere else the digits open an ordinary word (`2.1`, `3rd`).
    fn scan_number(&mut self) -> Token {
        let mut digits = String::new();
        while self.peek().is_ascii_digit() {
            digits.push(self.peek());
            self.advance();
        }

        let line_start = matches!(self.prev, None | Some(TokenKind::Newline));
        if self.peek() == '.' && line_start {
            self.advance(); // consume `.`
            return Token::new(TokenKind::ListMarker, format!("{digits}."));
        }

        self.scan_word(digits)
    }

    /// Scan a word up to whitespace, `=`, a closing pair character or end of input.
    fn scan_word(&mut self, mut word: String) -> Token {
        while !self.is_at_end() && !is_word_end(self.peek()) {
            word.push(self.peek());
            self.advance();
        }

        Token::new(TokenKind::Word, word)
    }

    // --- Helpers ---

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.pos]
        }
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}

fn is_word_end(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '=') || is_closing_pair(ch)
}
