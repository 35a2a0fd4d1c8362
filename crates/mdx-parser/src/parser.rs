//! Document parser for MDX.
//!
//! Recursive descent over the flat token stream from `mdx-lexer`. Containers
//! (`[ ... ]`, `@ ... @`, button labels) re-enter [`Parser::parse_until`] with their
//! own closing token. Constructs that never find their closer degrade to a
//! `Fragment` holding the exact source text consumed, so no input is lost.

use std::mem;

use crate::ast::{
    Bold, BlockQuote, Button, Code, CodeBlock, Component, Div, Header, HorizontalRule, Image,
    Italic, Link, ListItem, Nav, OrderedList, Paragraph, Property, Span, UnorderedList,
};
use crate::ParseError;
use mdx_lexer::{Lexer, Token, TokenKind};

/// MDX document parser.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

/// Delimiter that ends an inline run early, besides the end of the line.
#[derive(Debug, Clone, Copy)]
enum Closer {
    Single(TokenKind),
    Double(TokenKind),
}

/// What follows the end of a quoted line.
enum QuoteLine {
    /// The quote is over.
    End,
    /// An unmarked line of prose that continues the current level.
    Lazy,
    /// A line opening with this many `>` markers (already consumed).
    Marked(usize),
}

impl Parser {
    /// Create a new parser for the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse source into its top-level components.
    pub fn parse(source: &str) -> Result<Vec<Component>, ParseError> {
        let mut parser = Parser::new(Lexer::tokenize(source));
        parser.parse_until(TokenKind::Eof)
    }

    /// Parse components until `closing` or end of input. The closing token is
    /// left for the caller to consume. Properties still pending at that point are
    /// discarded.
    pub fn parse_until(&mut self, closing: TokenKind) -> Result<Vec<Component>, ParseError> {
        let mut components = Vec::new();
        let mut properties = Vec::new();

        while !self.check(closing) && !self.is_at_end() {
            if self.check(TokenKind::LBrace) {
                properties = self.parse_properties()?;
                continue;
            }

            let Some(component) = self.parse_component(&mut properties, closing)? else {
                continue;
            };

            if component.is_block() {
                self.skip_newlines();
                components.push(component);
            } else {
                components.push(self.join_paragraph(component, &mut properties, closing)?);
            }
        }

        Ok(components)
    }

    /// Dispatch on the current token. Returns `None` when the tokens consumed
    /// produce no component (whitespace, comments).
    fn parse_component(
        &mut self,
        properties: &mut Vec<Property>,
        closing: TokenKind,
    ) -> Result<Option<Component>, ParseError> {
        let next = self.peek_next_kind();
        let component = match self.peek().kind {
            TokenKind::Hash => self.parse_header(properties, closing)?,
            TokenKind::Word => return self.parse_paragraph(properties, closing),
            TokenKind::Backtick => self.parse_code(properties, closing),
            TokenKind::Asterisk if next == TokenKind::Asterisk => {
                self.parse_bold(properties, closing)?
            }
            TokenKind::Asterisk => self.parse_italic(properties, closing)?,
            TokenKind::Gt => self.parse_block_quote(properties, closing)?,
            TokenKind::ListMarker => self.parse_ordered_list(properties, closing)?,
            TokenKind::Dash if next == TokenKind::Space => {
                self.parse_unordered_list(properties, closing)?
            }
            TokenKind::Dash | TokenKind::Underscore => self.parse_rule(properties),
            TokenKind::Bang if next == TokenKind::LBracket => self.parse_image(properties, closing),
            TokenKind::LBracket if next.is_whitespace() => self.parse_div(properties)?,
            TokenKind::LBracket => self.parse_link(properties, closing)?,
            TokenKind::Lt => self.parse_short_link(properties, closing),
            TokenKind::Tilde => self.parse_button(properties, closing)?,
            TokenKind::At => self.parse_nav(properties)?,
            TokenKind::Dollar => self.parse_span(properties, closing)?,
            TokenKind::Caret if next == TokenKind::Caret => self.parse_code_block(properties),
            TokenKind::Slash if next == TokenKind::Slash => {
                self.skip_comment();
                return Ok(None);
            }
            TokenKind::Space | TokenKind::Tab | TokenKind::Newline => {
                self.advance();
                return Ok(None);
            }
            TokenKind::Eof => return Ok(None),
            _ => {
                let start = self.pos;
                self.advance();
                self.literal_since(start)
            }
        };
        Ok(Some(component))
    }

    /// An inline component followed by more prose becomes the first piece of a
    /// paragraph. A bare fragment is wrapped in a paragraph of its own.
    fn join_paragraph(
        &mut self,
        component: Component,
        properties: &mut Vec<Property>,
        closing: TokenKind,
    ) -> Result<Component, ParseError> {
        if matches!(component, Component::Paragraph(_)) {
            return Ok(component);
        }

        let blank = self.line_is_blank(closing);
        if blank {
            self.skip_spaces();
        }
        let continues = !blank || !self.paragraph_ends(closing);

        let mut content = Vec::new();
        push_component(&mut content, component);
        if continues {
            for piece in self.parse_block_fill(closing)? {
                push_component(&mut content, piece);
            }
        } else if !matches!(content.as_slice(), [Component::Fragment(_)]) {
            return Ok(content.remove(0));
        }

        Ok(Component::Paragraph(Paragraph {
            properties: mem::take(properties),
            content,
        }))
    }

    // =========================================================================
    // Paragraphs and inline runs
    // =========================================================================

    fn parse_paragraph(
        &mut self,
        properties: &mut Vec<Property>,
        closing: TokenKind,
    ) -> Result<Option<Component>, ParseError> {
        let content = self.parse_block_fill(closing)?;
        if content.is_empty() {
            return Ok(None);
        }
        Ok(Some(Component::Paragraph(Paragraph {
            properties: mem::take(properties),
            content,
        })))
    }

    /// Collect prose and inline constructs across soft line breaks until a
    /// blank line, the closer, or a line that opens another construct.
    fn parse_block_fill(&mut self, closing: TokenKind) -> Result<Vec<Component>, ParseError> {
        let mut content = Vec::new();
        let mut pending = Vec::new();

        while !self.paragraph_ends(closing) {
            if self.check(TokenKind::Newline) {
                self.advance();
                self.skip_spaces();
                push_text(&mut content, " ");
            } else {
                self.parse_inline_step(&mut content, &mut pending, closing)?;
            }
        }

        trim_end(&mut content);
        Ok(content)
    }

    /// Collect inline content up to the end of the line, `closing`, or `closer`.
    /// None of those tokens are consumed.
    fn parse_inline_until(
        &mut self,
        closer: Option<Closer>,
        closing: TokenKind,
    ) -> Result<Vec<Component>, ParseError> {
        let mut content = Vec::new();
        let mut pending = Vec::new();

        while !self.check(TokenKind::Newline)
            && !self.check(closing)
            && !self.is_at_end()
            && !closer.is_some_and(|c| self.at_closer(c))
        {
            self.parse_inline_step(&mut content, &mut pending, closing)?;
        }

        Ok(content)
    }

    /// Consume one piece of inline content: a property block, an inline
    /// construct or one token of literal text.
    fn parse_inline_step(
        &mut self,
        content: &mut Vec<Component>,
        pending: &mut Vec<Property>,
        closing: TokenKind,
    ) -> Result<(), ParseError> {
        if self.check(TokenKind::LBrace) {
            *pending = self.parse_properties()?;
        } else if self.starts_inline() {
            if let Some(component) = self.parse_component(pending, closing)? {
                push_component(content, component);
            }
        } else {
            push_text(content, self.peek().text());
            self.advance();
        }
        Ok(())
    }

    fn starts_inline(&self) -> bool {
        let next = self.peek_next_kind();
        match self.peek().kind {
            TokenKind::Backtick
            | TokenKind::Asterisk
            | TokenKind::LBracket
            | TokenKind::Lt
            | TokenKind::Dollar
            | TokenKind::Tilde => true,
            TokenKind::Bang => next == TokenKind::LBracket,
            TokenKind::Caret => next == TokenKind::Caret,
            _ => false,
        }
    }

    fn paragraph_ends(&self, closing: TokenKind) -> bool {
        let kind = self.peek().kind;
        if kind == TokenKind::Eof || kind == closing {
            return true;
        }
        if kind != TokenKind::Newline {
            return false;
        }

        let line = self.skip_blank_from(self.pos + 1);
        let next = self.kind_at(line);
        next == TokenKind::Newline
            || next == TokenKind::Eof
            || next == closing
            || self.starts_construct_at(line)
    }

    /// Whether the token at `idx` opens a construct that ends a paragraph when
    /// it starts a line.
    fn starts_construct_at(&self, idx: usize) -> bool {
        let next = self.kind_at(idx + 1);
        match self.kind_at(idx) {
            TokenKind::Hash
            | TokenKind::Gt
            | TokenKind::ListMarker
            | TokenKind::Backtick
            | TokenKind::Asterisk
            | TokenKind::LBracket
            | TokenKind::Lt
            | TokenKind::Tilde
            | TokenKind::At
            | TokenKind::Dollar
            | TokenKind::LBrace => true,
            TokenKind::Dash => matches!(next, TokenKind::Space | TokenKind::Dash),
            TokenKind::Underscore => next == TokenKind::Underscore,
            TokenKind::Bang => next == TokenKind::LBracket,
            TokenKind::Caret => next == TokenKind::Caret,
            TokenKind::Slash => next == TokenKind::Slash,
            _ => false,
        }
    }

    /// Whether only spaces remain before the end of the line.
    fn line_is_blank(&self, closing: TokenKind) -> bool {
        let next = self.kind_at(self.skip_blank_from(self.pos));
        next == TokenKind::Newline || next == TokenKind::Eof || next == closing
    }

    fn at_closer(&self, closer: Closer) -> bool {
        match closer {
            Closer::Single(kind) => self.check(kind),
            Closer::Double(kind) => self.check(kind) && self.peek_next_kind() == kind,
        }
    }

    // =========================================================================
    // Headers
    // =========================================================================

    /// `# Title`. Without a space after the hashes, or past six of them, the
    /// line is a paragraph starting with the hashes.
    fn parse_header(
        &mut self,
        properties: &mut Vec<Property>,
        closing: TokenKind,
    ) -> Result<Component, ParseError> {
        let start = self.pos;
        let mut level = 0usize;
        while self.check(TokenKind::Hash) {
            level += 1;
            self.advance();
        }

        if !self.check(TokenKind::Space) || level > 6 {
            let mut content = vec![self.literal_since(start)];
            for piece in self.parse_block_fill(closing)? {
                push_component(&mut content, piece);
            }
            return Ok(Component::Paragraph(Paragraph {
                properties: mem::take(properties),
                content,
            }));
        }

        self.skip_spaces();
        let mut content = self.parse_inline_until(None, closing)?;
        trim_end(&mut content);

        Ok(Component::Header(Header {
            level: level as u8,
            properties: mem::take(properties),
            content,
        }))
    }

    // =========================================================================
    // Inline constructs
    // =========================================================================

    /// `` `code` `` or ``` ``code`` ```. Never spans lines.
    fn parse_code(&mut self, properties: &mut Vec<Property>, closing: TokenKind) -> Component {
        let start = self.pos;
        let ticks = if self.peek_next_kind() == TokenKind::Backtick {
            2
        } else {
            1
        };
        self.pos += ticks;

        let closer = if ticks == 2 {
            Closer::Double(TokenKind::Backtick)
        } else {
            Closer::Single(TokenKind::Backtick)
        };

        let mut text = String::new();
        while !self.at_closer(closer) {
            if self.check(TokenKind::Newline) || self.check(closing) || self.is_at_end() {
                return self.literal_since(start);
            }
            text.push_str(self.peek().text());
            self.advance();
        }
        self.pos += ticks;

        Component::Code(Code {
            properties: mem::take(properties),
            text,
        })
    }

    fn parse_bold(
        &mut self,
        properties: &mut Vec<Property>,
        closing: TokenKind,
    ) -> Result<Component, ParseError> {
        let start = self.pos;
        self.pos += 2;
        if self.peek().kind.is_whitespace() || self.is_at_end() {
            return Ok(self.literal_since(start));
        }

        let closer = Closer::Double(TokenKind::Asterisk);
        let content = self.parse_inline_until(Some(closer), closing)?;
        if !self.at_closer(closer) {
            return Ok(self.literal_since(start));
        }
        self.pos += 2;

        Ok(Component::Bold(Bold {
            properties: mem::take(properties),
            content,
        }))
    }

    /// `*italic*`. An asterisk followed by whitespace is plain text.
    fn parse_italic(
        &mut self,
        properties: &mut Vec<Property>,
        closing: TokenKind,
    ) -> Result<Component, ParseError> {
        let start = self.pos;
        self.advance();
        if self.peek().kind.is_whitespace() || self.is_at_end() {
            return Ok(self.literal_since(start));
        }

        let content = self.parse_inline_until(Some(Closer::Single(TokenKind::Asterisk)), closing)?;
        if !self.check(TokenKind::Asterisk) {
            return Ok(self.literal_since(start));
        }
        self.advance();

        Ok(Component::Italic(Italic {
            properties: mem::take(properties),
            content,
        }))
    }

    /// `[label](url)`. The label may hold inline constructs.
    fn parse_link(
        &mut self,
        properties: &mut Vec<Property>,
        closing: TokenKind,
    ) -> Result<Component, ParseError> {
        let start = self.pos;
        self.advance(); // consume [

        let content = self.parse_inline_until(Some(Closer::Single(TokenKind::RBracket)), closing)?;
        if !self.check(TokenKind::RBracket) {
            return Ok(self.literal_since(start));
        }
        self.advance();

        if !self.check(TokenKind::LParen) {
            return Ok(self.literal_since(start));
        }
        self.advance();

        let Some(url) = self.scan_text_until(TokenKind::RParen, closing) else {
            return Ok(self.literal_since(start));
        };
        self.advance();

        Ok(Component::Link(Link {
            properties: mem::take(properties),
            url,
            content,
        }))
    }

    /// `<url>`: the url doubles as the label.
    fn parse_short_link(&mut self, properties: &mut Vec<Property>, closing: TokenKind) -> Component {
        let start = self.pos;
        self.advance(); // consume <

        let url = match self.scan_text_until(TokenKind::Gt, closing) {
            Some(url) if !url.is_empty() && !url.contains(char::is_whitespace) => url,
            _ => return self.literal_since(start),
        };
        self.advance();

        Component::Link(Link {
            properties: mem::take(properties),
            content: vec![Component::text(url.clone())],
            url,
        })
    }

    /// `$ text $`. Surrounding spaces inside the dollars are dropped.
    fn parse_span(
        &mut self,
        properties: &mut Vec<Property>,
        closing: TokenKind,
    ) -> Result<Component, ParseError> {
        let start = self.pos;
        self.advance(); // consume $
        if self.check(TokenKind::Newline) || self.is_at_end() {
            return Ok(self.literal_since(start));
        }

        let mut content = self.parse_inline_until(Some(Closer::Single(TokenKind::Dollar)), closing)?;
        if !self.check(TokenKind::Dollar) {
            return Ok(self.literal_since(start));
        }
        self.advance();

        trim_start(&mut content);
        trim_end(&mut content);

        Ok(Component::Span(Span {
            properties: mem::take(properties),
            content,
        }))
    }

    // =========================================================================
    // Images, buttons and containers
    // =========================================================================

    /// `![alt](url)`
    fn parse_image(&mut self, properties: &mut Vec<Property>, closing: TokenKind) -> Component {
        let start = self.pos;
        self.pos += 2; // consume ![

        let Some(alt) = self.scan_text_until(TokenKind::RBracket, closing) else {
            return self.literal_since(start);
        };
        self.advance();

        if !self.check(TokenKind::LParen) {
            return self.literal_since(start);
        }
        self.advance();

        let Some(url) = self.scan_text_until(TokenKind::RParen, closing) else {
            return self.literal_since(start);
        };
        self.advance();

        Component::Image(Image {
            properties: mem::take(properties),
            url,
            alt,
        })
    }

    /// `~[label](handler)`. The label stays on one line and is parsed like a
    /// container body.
    fn parse_button(
        &mut self,
        properties: &mut Vec<Property>,
        closing: TokenKind,
    ) -> Result<Component, ParseError> {
        let start = self.pos;
        self.advance(); // consume ~
        if !self.check(TokenKind::LBracket) {
            return Ok(self.literal_since(start));
        }
        self.advance();

        let Some(end) = self.label_end(closing) else {
            // Unclosed label: the opener is text, what follows parses normally.
            return Ok(self.literal_since(start));
        };
        let mut label = Parser::new(self.tokens[self.pos..end].to_vec());
        let content = label.parse_until(TokenKind::Eof)?;
        self.pos = end + 1;

        if !self.check(TokenKind::LParen) {
            return Ok(self.literal_since(start));
        }
        self.advance();

        let Some(on_click) = self.scan_text_until(TokenKind::RParen, closing) else {
            return Ok(self.literal_since(start));
        };
        self.advance();

        Ok(Component::Button(Button {
            properties: mem::take(properties),
            on_click,
            content,
        }))
    }

    /// `[ children ]`. An unclosed div runs to the end of its enclosing scope.
    fn parse_div(&mut self, properties: &mut Vec<Property>) -> Result<Component, ParseError> {
        self.advance(); // consume [
        self.skip_whitespace();

        let children = self.parse_until(TokenKind::RBracket)?;
        if self.check(TokenKind::RBracket) {
            self.advance();
        }

        Ok(Component::Div(Div {
            properties: mem::take(properties),
            children,
        }))
    }

    /// `@ children @`
    fn parse_nav(&mut self, properties: &mut Vec<Property>) -> Result<Component, ParseError> {
        self.advance(); // consume @
        self.skip_whitespace();

        let children = self
            .parse_until(TokenKind::At)?
            .into_iter()
            .filter(|child| !matches!(child, Component::LineBreak))
            .collect();
        if self.check(TokenKind::At) {
            self.advance();
        }

        Ok(Component::Nav(Nav {
            properties: mem::take(properties),
            children,
        }))
    }

    /// `^^ ... ^^`, taken verbatim.
    fn parse_code_block(&mut self, properties: &mut Vec<Property>) -> Component {
        let start = self.pos;
        self.pos += 2; // consume ^^

        let closer = Closer::Double(TokenKind::Caret);
        let mut text = String::new();
        while !self.at_closer(closer) {
            if self.is_at_end() {
                return self.literal_since(start);
            }
            text.push_str(self.peek().text());
            self.advance();
        }
        self.pos += 2;

        let text = text.replace('\t', "    ");
        let text = text.strip_prefix('\n').unwrap_or(&text);
        let text = text.strip_suffix('\n').unwrap_or(text);

        Component::CodeBlock(CodeBlock {
            properties: mem::take(properties),
            text: text.to_string(),
        })
    }

    // =========================================================================
    // Block quotes
    // =========================================================================

    fn parse_block_quote(
        &mut self,
        properties: &mut Vec<Property>,
        closing: TokenKind,
    ) -> Result<Component, ParseError> {
        let markers = self.consume_quote_markers();
        let (mut quote, _) = self.parse_quote_level(1, markers, closing)?;
        quote.properties = mem::take(properties);
        Ok(Component::BlockQuote(quote))
    }

    /// Parse the quote at depth `level`, entered on a line carrying `markers`
    /// markers. Returns the quote and the marker count of the line that ended
    /// it, or 0 when the quote is over altogether.
    fn parse_quote_level(
        &mut self,
        level: usize,
        mut markers: usize,
        closing: TokenKind,
    ) -> Result<(BlockQuote, usize), ParseError> {
        let mut content = Vec::new();

        loop {
            if markers > level {
                let (inner, next) = self.parse_quote_level(level + 1, markers, closing)?;
                content.push(Component::BlockQuote(inner));
                markers = next;
                if markers < level {
                    break;
                }
                if markers == level {
                    push_line_break(&mut content);
                }
                continue;
            }

            for piece in self.parse_inline_until(None, closing)? {
                push_component(&mut content, piece);
            }
            trim_end(&mut content);

            match self.next_quote_line() {
                QuoteLine::End => {
                    markers = 0;
                    break;
                }
                QuoteLine::Lazy => push_text(&mut content, " "),
                QuoteLine::Marked(count) => {
                    markers = count;
                    if markers < level {
                        break;
                    }
                    if markers == level {
                        push_line_break(&mut content);
                    }
                }
            }
        }

        if matches!(content.last(), Some(Component::LineBreak)) {
            content.pop();
        }

        Ok((
            BlockQuote {
                properties: Vec::new(),
                content,
            },
            markers,
        ))
    }

    /// Look past the newline ending a quoted line and decide how the quote goes on.
    fn next_quote_line(&mut self) -> QuoteLine {
        if !self.check(TokenKind::Newline) {
            return QuoteLine::End;
        }

        let line = self.pos + 1;
        let first = self.skip_blank_from(line);
        match self.kind_at(first) {
            TokenKind::Gt => {
                self.pos = line;
                QuoteLine::Marked(self.consume_quote_markers())
            }
            TokenKind::Word => {
                self.pos = first;
                QuoteLine::Lazy
            }
            TokenKind::Backtick | TokenKind::Asterisk | TokenKind::Dollar => {
                self.pos = first;
                QuoteLine::Lazy
            }
            _ => QuoteLine::End,
        }
    }

    /// Consume a run of `>` markers, allowing spaces between them.
    fn consume_quote_markers(&mut self) -> usize {
        let mut count = 0;
        loop {
            match self.peek().kind {
                TokenKind::Gt => count += 1,
                TokenKind::Space | TokenKind::Tab => {}
                _ => return count,
            }
            self.advance();
        }
    }

    // =========================================================================
    // Lists and rules
    // =========================================================================

    fn parse_ordered_list(
        &mut self,
        properties: &mut Vec<Property>,
        closing: TokenKind,
    ) -> Result<Component, ParseError> {
        let start = self
            .peek()
            .literal
            .trim_end_matches('.')
            .parse::<u64>()
            .unwrap_or(1);

        let mut items = Vec::new();
        loop {
            self.advance(); // consume marker
            self.skip_spaces();
            items.push(self.parse_list_item(closing)?);

            if self.check(TokenKind::Newline) && self.peek_next_kind() == TokenKind::ListMarker {
                self.advance();
            } else {
                break;
            }
        }

        Ok(Component::OrderedList(OrderedList {
            properties: mem::take(properties),
            items,
            start,
        }))
    }

    fn parse_unordered_list(
        &mut self,
        properties: &mut Vec<Property>,
        closing: TokenKind,
    ) -> Result<Component, ParseError> {
        let mut items = Vec::new();
        loop {
            self.advance(); // consume -
            self.skip_spaces();
            items.push(self.parse_list_item(closing)?);

            if self.check(TokenKind::Newline)
                && self.kind_at(self.pos + 1) == TokenKind::Dash
                && self.kind_at(self.pos + 2) == TokenKind::Space
            {
                self.advance();
            } else {
                break;
            }
        }

        Ok(Component::UnorderedList(UnorderedList {
            properties: mem::take(properties),
            items,
        }))
    }

    /// The rest of a list line. A leading property block belongs to the item.
    fn parse_list_item(&mut self, closing: TokenKind) -> Result<ListItem, ParseError> {
        let properties = if self.check(TokenKind::LBrace) {
            self.parse_properties()?
        } else {
            Vec::new()
        };

        let mut content = self.parse_inline_until(None, closing)?;
        trim_end(&mut content);

        Ok(ListItem {
            properties,
            component: Box::new(Component::Paragraph(Paragraph {
                properties: Vec::new(),
                content,
            })),
        })
    }

    /// Three or more `-` or `_` make a rule. Shorter runs are text.
    fn parse_rule(&mut self, properties: &mut Vec<Property>) -> Component {
        let start = self.pos;
        let marker = self.peek().kind;
        while self.check(marker) {
            self.advance();
        }

        if self.pos - start < 3 {
            return self.literal_since(start);
        }
        Component::HorizontalRule(HorizontalRule {
            properties: mem::take(properties),
        })
    }

    // =========================================================================
    // Properties and comments
    // =========================================================================

    /// Parse `{ .key=value ... }`. Any deviation is an error.
    fn parse_properties(&mut self) -> Result<Vec<Property>, ParseError> {
        self.advance(); // consume {

        let mut properties = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek().kind {
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                TokenKind::Dot => {
                    self.advance();
                    let name = self.expect_word("DOT must be followed by a WORD")?;
                    if !self.check(TokenKind::Equals) {
                        return Err(self.error(format!(
                            "Property formatted incorrectly. '{name}' must be followed by EQUALS"
                        )));
                    }
                    self.advance();
                    let value = self.expect_word("EQUALS must be followed by a VALUE")?;
                    properties.push(Property { name, value });
                }
                TokenKind::Eof => {
                    return Err(self.error("Property block is missing its closing '}'".to_string()));
                }
                other => {
                    return Err(self.error(format!(
                        "Property formatted incorrectly. Expected DOT or '}}', got {other:?}"
                    )));
                }
            }
        }

        self.skip_spaces();
        Ok(properties)
    }

    fn skip_comment(&mut self) {
        while !self.check(TokenKind::Newline) && !self.is_at_end() {
            self.advance();
        }
    }

    // =========================================================================
    // Token navigation helpers
    // =========================================================================

    fn peek(&self) -> &Token {
        static EOF: std::sync::LazyLock<Token> = std::sync::LazyLock::new(Token::eof);
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    fn kind_at(&self, idx: usize) -> TokenKind {
        self.tokens.get(idx).map_or(TokenKind::Eof, |t| t.kind)
    }

    fn peek_next_kind(&self) -> TokenKind {
        self.kind_at(self.pos + 1)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len() || matches!(self.peek().kind, TokenKind::Eof)
    }

    fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek().kind, TokenKind::Space | TokenKind::Tab) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().kind.is_whitespace() {
            self.advance();
        }
    }

    /// Index of the first token at or after `idx` that is not a space or tab.
    fn skip_blank_from(&self, mut idx: usize) -> usize {
        while matches!(self.kind_at(idx), TokenKind::Space | TokenKind::Tab) {
            idx += 1;
        }
        idx
    }

    /// Collect raw text up to `end`. `None` if the line, the enclosing scope or
    /// the input ends first.
    fn scan_text_until(&mut self, end: TokenKind, closing: TokenKind) -> Option<String> {
        let mut text = String::new();
        while !self.check(end) {
            if self.check(TokenKind::Newline) || self.check(closing) || self.is_at_end() {
                return None;
            }
            text.push_str(self.peek().text());
            self.advance();
        }
        Some(text)
    }

    /// Index of the `]` closing a button label that starts at the current token.
    /// Nested brackets must balance, and the label may not cross a line end or
    /// `closing`.
    fn label_end(&self, closing: TokenKind) -> Option<usize> {
        let mut depth = 0usize;
        for (idx, token) in self.tokens.iter().enumerate().skip(self.pos) {
            match token.kind {
                TokenKind::RBracket if depth == 0 => return Some(idx),
                TokenKind::RBracket => depth -= 1,
                TokenKind::LBracket => depth += 1,
                TokenKind::Newline | TokenKind::Eof => return None,
                kind if kind == closing => return None,
                _ => {}
            }
        }
        None
    }

    /// The source text of everything consumed since `start`, as a fragment.
    fn literal_since(&self, start: usize) -> Component {
        let end = self.pos.min(self.tokens.len());
        let text: String = self.tokens[start.min(end)..end]
            .iter()
            .map(Token::text)
            .collect();
        Component::text(text)
    }

    fn expect_word(&mut self, message: &str) -> Result<String, ParseError> {
        if self.check(TokenKind::Word) {
            let word = self.peek().literal.clone();
            self.advance();
            Ok(word)
        } else {
            Err(self.error(format!("Property formatted incorrectly. {message}")))
        }
    }

    fn error(&self, message: String) -> ParseError {
        ParseError { message }
    }
}

// =============================================================================
// Content builders
// =============================================================================

/// Append text, merging into a trailing fragment.
fn push_text(content: &mut Vec<Component>, text: &str) {
    if let Some(Component::Fragment(last)) = content.last_mut() {
        last.text.push_str(text);
    } else {
        content.push(Component::text(text));
    }
}

fn push_component(content: &mut Vec<Component>, component: Component) {
    match component {
        Component::Fragment(fragment) => push_text(content, &fragment.text),
        other => content.push(other),
    }
}

/// Separate two quoted lines at the same depth, never twice in a row.
fn push_line_break(content: &mut Vec<Component>) {
    if !content.is_empty() && !matches!(content.last(), Some(Component::LineBreak)) {
        content.push(Component::LineBreak);
    }
}

fn trim_end(content: &mut Vec<Component>) {
    if let Some(Component::Fragment(last)) = content.last_mut() {
        let trimmed = last.text.trim_end().len();
        last.text.truncate(trimmed);
        if last.text.is_empty() {
            content.pop();
        }
    }
}

fn trim_start(content: &mut Vec<Component>) {
    if let Some(Component::Fragment(first)) = content.first_mut() {
        first.text = first.text.trim_start().to_string();
        if first.text.is_empty() {
            content.remove(0);
        }
    }
}
