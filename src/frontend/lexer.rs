//! Lexer for Iblang
//!
//! Converts source code into a stream of tokens. Malformed input never
//! stops the lexer: each problem is recorded once in `errors` and an
//! `Error` token stands in for the bad text.

use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Span};

/// The lexer state
pub struct Lexer<'a> {
    /// Source code
    source: &'a str,
    /// Current byte offset in source
    pos: usize,
    /// Start byte offset of current token
    start: usize,
    /// File ID for span tracking
    file_id: usize,
    /// Lexical errors seen so far
    errors: Vec<Error>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str, file_id: usize) -> Self {
        Self {
            source,
            pos: 0,
            start: 0,
            file_id,
            errors: Vec::new(),
        }
    }

    /// Lexical errors recorded so far, in source order
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    /// Get the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Get the next character without advancing
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advance to the next character
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Check if we've reached the end of input
    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Create a span from start to current position
    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos, self.file_id)
    }

    /// Create a token with the current span
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, &self.source[self.start..self.pos], self.make_span())
    }

    /// Record an error and produce the stand-in token for the current lexeme
    fn error_token(&mut self, error: Error) -> Token {
        self.errors.push(error);
        self.make_token(TokenKind::Error)
    }

    /// Skip whitespace and comments
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                // Whitespace
                c if c.is_whitespace() => {
                    self.advance();
                }
                // Line comment
                '/' if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                // Block comment, ends at the first `*/`
                '/' if self.peek_next() == Some('*') => {
                    let start = self.pos;
                    self.advance();
                    self.advance();
                    let mut closed = false;
                    while !self.is_at_end() {
                        if self.peek() == Some('*') && self.peek_next() == Some('/') {
                            self.advance();
                            self.advance();
                            closed = true;
                            break;
                        }
                        self.advance();
                    }
                    if !closed {
                        self.errors.push(Error::UnterminatedComment {
                            span: Span::new(start, start + 2, self.file_id),
                        });
                    }
                }
                _ => break,
            }
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.source[self.start..self.pos];
        let kind = TokenKind::keyword_from_str(text)
            .unwrap_or_else(|| TokenKind::Ident(text.to_string()));

        self.make_token(kind)
    }

    /// Read a number literal: digits, optionally `.` and more digits
    fn read_number(&mut self) -> Token {
        self.eat_digits();

        if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            self.advance(); // consume '.'
            self.eat_digits();
        }

        // `12abc` is one malformed literal, not a number and an identifier
        if self.peek().map_or(false, is_ident_continue) {
            while self.peek().map_or(false, is_ident_continue) {
                self.advance();
            }
            let text = self.source[self.start..self.pos].to_string();
            let span = self.make_span();
            return self.error_token(Error::MalformedNumber { text, span });
        }

        self.make_token(TokenKind::Number)
    }

    fn eat_digits(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Read the character after a backslash. `quote` is the delimiter the
    /// literal being read may escape.
    fn read_escape(&mut self, quote: char) -> Option<char> {
        let escape_start = self.pos - 1;
        let c = self.advance()?;
        let value = match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            '\\' => '\\',
            c if c == quote => quote,
            other => {
                self.errors.push(Error::InvalidEscape {
                    ch: other,
                    span: Span::new(escape_start, self.pos, self.file_id),
                });
                other
            }
        };
        Some(value)
    }

    /// Read a string literal
    fn read_string(&mut self) -> Token {
        self.advance(); // consume opening quote

        let mut value = String::new();

        loop {
            match self.peek() {
                Some('"') => {
                    self.advance();
                    return self.make_token(TokenKind::StringLit(value));
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some('\n') | None => break,
                        Some(_) => {
                            if let Some(c) = self.read_escape('"') {
                                value.push(c);
                            }
                        }
                    }
                }
                Some('\n') | None => break,
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        let span = self.make_span();
        self.error_token(Error::UnterminatedString { span })
    }

    /// Read a character literal
    fn read_char(&mut self) -> Token {
        self.advance(); // consume opening quote

        let value = match self.peek() {
            Some('\'') => {
                self.advance();
                let span = self.make_span();
                return self.error_token(Error::InvalidCharLiteral { span });
            }
            Some('\n') | None => {
                let span = self.make_span();
                return self.error_token(Error::UnterminatedChar { span });
            }
            Some('\\') => {
                self.advance();
                match self.peek() {
                    Some('\n') | None => {
                        let span = self.make_span();
                        return self.error_token(Error::UnterminatedChar { span });
                    }
                    Some(_) => self.read_escape('\''),
                }
            }
            Some(_) => self.advance(),
        };

        if self.peek() == Some('\'') {
            self.advance();
            return match value {
                Some(c) => self.make_token(TokenKind::CharLit(c)),
                None => {
                    let span = self.make_span();
                    self.error_token(Error::UnterminatedChar { span })
                }
            };
        }

        // More than one character: swallow up to the closing quote on this line
        let rest = &self.source[self.pos..];
        let line_end = rest.find('\n').unwrap_or(rest.len());
        match rest[..line_end].find('\'') {
            Some(offset) => {
                self.pos += offset + 1;
                let span = self.make_span();
                self.error_token(Error::InvalidCharLiteral { span })
            }
            None => {
                let span = self.make_span();
                self.error_token(Error::UnterminatedChar { span })
            }
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return Token::eof(self.make_span());
        };

        // Identifiers and keywords
        if is_ident_start(c) {
            return self.read_identifier();
        }

        // Numbers
        if c.is_ascii_digit() {
            return self.read_number();
        }

        // String literals
        if c == '"' {
            return self.read_string();
        }

        // Character literals
        if c == '\'' {
            return self.read_char();
        }

        self.advance();

        // Operators and punctuation
        let kind = match c {
            '+' => self.with_eq(TokenKind::PlusEq, TokenKind::Plus),
            '-' => self.with_eq(TokenKind::MinusEq, TokenKind::Minus),
            '*' => self.with_eq(TokenKind::StarEq, TokenKind::Star),
            '/' => self.with_eq(TokenKind::SlashEq, TokenKind::Slash),
            '%' => self.with_eq(TokenKind::PercentEq, TokenKind::Percent),
            '!' => self.with_eq(TokenKind::Ne, TokenKind::Not),
            '<' => self.with_eq(TokenKind::Le, TokenKind::Lt),
            '>' => self.with_eq(TokenKind::Ge, TokenKind::Gt),
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::EqEq
                } else if self.peek() == Some('>') {
                    self.advance();
                    TokenKind::FatArrow
                } else {
                    TokenKind::Eq
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    TokenKind::AndAnd
                } else {
                    TokenKind::And
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    TokenKind::OrOr
                } else {
                    TokenKind::Pipe
                }
            }
            '.' => {
                if self.peek() == Some('.') && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    TokenKind::DotDotDot
                } else {
                    TokenKind::Dot
                }
            }
            ':' => {
                if self.peek() == Some(':') {
                    self.advance();
                    TokenKind::ColonColon
                } else {
                    TokenKind::Colon
                }
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            other => {
                let span = self.make_span();
                return self.error_token(Error::UnexpectedChar { ch: other, span });
            }
        };

        self.make_token(kind)
    }

    /// `op=` if the next character is `=`, otherwise the bare operator
    fn with_eq(&mut self, compound: TokenKind, bare: TokenKind) -> TokenKind {
        if self.peek() == Some('=') {
            self.advance();
            compound
        } else {
            bare
        }
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        log::debug!(
            "lexed {} tokens with {} error(s)",
            tokens.len(),
            self.errors.len()
        );
        tokens
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
