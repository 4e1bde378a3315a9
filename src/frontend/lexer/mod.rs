//! Lexer module
//!
//! Scans SHLL source text into classified tokens. Whitespace and comments
//! are dropped but still separate adjacent tokens.

pub mod tokens;

use std::fmt;
use tokens::*;

pub use tokenizer::tokenize;

/// What went wrong while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token
    UnexpectedChar,
    UnterminatedString,
    UnterminatedChar,
    EmptyChar,
    UnterminatedComment,
    /// Base prefix (`0x`, `0o`, `0b`) with no digits after it
    MissingDigits { radix: u32 },
    /// Integer literal that does not fit in an `i64`
    IntegerOutOfRange,
    /// Decimal literal that does not fit in an `f64`
    DecimalOutOfRange,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnexpectedChar => f.write_str("unexpected character"),
            LexErrorKind::UnterminatedString => f.write_str("unterminated string literal"),
            LexErrorKind::UnterminatedChar => f.write_str("unterminated character literal"),
            LexErrorKind::EmptyChar => f.write_str("empty character literal"),
            LexErrorKind::UnterminatedComment => f.write_str("unterminated block comment"),
            LexErrorKind::MissingDigits { radix } => {
                write!(f, "expected base-{} digits after prefix", radix)
            }
            LexErrorKind::IntegerOutOfRange => f.write_str("integer literal out of range"),
            LexErrorKind::DecimalOutOfRange => f.write_str("decimal literal out of range"),
        }
    }
}

/// Lexer error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{line}:{column}: {kind}, found {found:?}")]
pub struct LexicalError {
    /// Byte offset where the offending text starts
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    /// Offending source text
    pub found: String,
    pub kind: LexErrorKind,
}

/// Tokenize source code
mod tokenizer {
    use super::*;
    use crate::util::span::{Position, Span};
    use std::iter::Peekable;
    use std::str::Chars;

    /// Scan `source` into tokens, terminated by a single `Eof` token.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();

        while let Some(token) = lexer.next_token()? {
            tokens.push(token);
        }

        let end = lexer.position();
        tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            span: Span::new(end, end),
            literal: None,
        });
        Ok(tokens)
    }

    struct Lexer<'a> {
        source: &'a str,
        chars: Peekable<Chars<'a>>,
        offset: usize,
        line: usize,
        column: usize,
        start_offset: usize,
        start_line: usize,
        start_column: usize,
    }

    impl<'a> Lexer<'a> {
        fn new(source: &'a str) -> Self {
            Self {
                source,
                chars: source.chars().peekable(),
                offset: 0,
                line: 1,
                column: 1,
                start_offset: 0,
                start_line: 1,
                start_column: 1,
            }
        }

        fn position(&self) -> Position {
            Position::with_offset(self.line, self.column, self.offset)
        }

        fn start_position(&self) -> Position {
            Position::with_offset(self.start_line, self.start_column, self.start_offset)
        }

        fn span(&self) -> Span {
            Span::new(self.start_position(), self.position())
        }

        fn lexeme(&self) -> &'a str {
            &self.source[self.start_offset..self.offset]
        }

        fn advance(&mut self) -> Option<char> {
            match self.chars.next() {
                Some('\n') => {
                    self.offset += 1;
                    self.line += 1;
                    self.column = 1;
                    Some('\n')
                }
                Some(c) => {
                    self.offset += c.len_utf8();
                    self.column += 1;
                    Some(c)
                }
                None => None,
            }
        }

        fn peek(&mut self) -> Option<char> {
            self.chars.peek().copied()
        }

        fn peek_next(&self) -> Option<char> {
            self.chars.clone().nth(1)
        }

        fn mark_start(&mut self) {
            self.start_offset = self.offset;
            self.start_line = self.line;
            self.start_column = self.column;
        }

        fn error(&self, kind: LexErrorKind) -> LexicalError {
            LexicalError {
                offset: self.start_offset,
                line: self.start_line,
                column: self.start_column,
                found: self.lexeme().to_string(),
                kind,
            }
        }

        fn skip_whitespace_and_comments(&mut self) -> Result<(), LexicalError> {
            while let Some(c) = self.peek() {
                match c {
                    ' ' | '\t' | '\r' | '\n' => {
                        self.advance();
                    }
                    '/' if self.peek_next() == Some('/') => {
                        while let Some(c) = self.peek() {
                            if c == '\n' {
                                break;
                            }
                            self.advance();
                        }
                    }
                    '/' if self.peek_next() == Some('*') => {
                        self.mark_start();
                        self.advance();
                        self.advance();
                        loop {
                            match self.advance() {
                                Some('*') if self.peek() == Some('/') => {
                                    self.advance();
                                    break;
                                }
                                Some(_) => {}
                                None => {
                                    let mut err = self.error(LexErrorKind::UnterminatedComment);
                                    err.found = "/*".to_string();
                                    return Err(err);
                                }
                            }
                        }
                    }
                    _ => break,
                }
            }
            Ok(())
        }

        fn next_token(&mut self) -> Result<Option<Token>, LexicalError> {
            self.skip_whitespace_and_comments()?;

            self.mark_start();
            let c = match self.advance() {
                Some(c) => c,
                None => return Ok(None),
            };

            let token = match c {
                c if is_identifier_start(c) => self.scan_identifier(),
                c if is_digit(c) => self.scan_number()?,
                '+' | '-' if self.peek().map(is_digit).unwrap_or(false) => self.scan_number()?,
                '-' if self.peek() == Some('>') => {
                    self.advance();
                    self.make_token(TokenKind::Arrow)
                }
                '"' => self.scan_string()?,
                '\'' => self.scan_char()?,
                '{' => self.make_token(TokenKind::LBrace),
                '}' => self.make_token(TokenKind::RBrace),
                '(' => self.make_token(TokenKind::LParen),
                ')' => self.make_token(TokenKind::RParen),
                '[' => self.make_token(TokenKind::LBracket),
                ']' => self.make_token(TokenKind::RBracket),
                ':' => self.make_token(TokenKind::Colon),
                '.' => self.make_token(TokenKind::Dot),
                '*' => {
                    if self.peek() == Some('*') {
                        self.advance();
                        self.make_token(TokenKind::StarStar)
                    } else {
                        self.make_token(TokenKind::Star)
                    }
                }
                '=' => {
                    if self.peek() == Some('>') {
                        self.advance();
                        self.make_token(TokenKind::FatArrow)
                    } else {
                        self.make_token(TokenKind::Eq)
                    }
                }
                _ => return Err(self.error(LexErrorKind::UnexpectedChar)),
            };
            Ok(Some(token))
        }

        fn scan_identifier(&mut self) -> Token {
            while let Some(c) = self.peek() {
                if is_identifier_char(c) {
                    self.advance();
                } else {
                    break;
                }
            }

            let word = self.lexeme();
            match word {
                "true" | "false" => {
                    let value = word == "true";
                    let mut token = self.make_token(TokenKind::Bool);
                    token.literal = Some(Literal::Bool(value));
                    token
                }
                _ => match TokenKind::keyword(word) {
                    Some(kind) => self.make_token(kind),
                    None => self.make_token(TokenKind::Ident),
                },
            }
        }

        /// Scan an integer or decimal literal. The first character (digit or
        /// sign) has already been consumed.
        fn scan_number(&mut self) -> Result<Token, LexicalError> {
            let first = self.lexeme().chars().next().unwrap_or('0');
            let lead_zero = match first {
                '0' => true,
                '+' | '-' if self.peek() == Some('0') => {
                    self.advance();
                    true
                }
                _ => false,
            };

            if lead_zero {
                if let Some(radix) = self.peek().and_then(radix_for_prefix) {
                    self.advance();
                    return self.scan_radix_integer(radix);
                }
            }

            self.eat_digits(10);

            if self.peek() == Some('.') && self.peek_next().map(is_digit).unwrap_or(false) {
                self.advance();
                self.eat_digits(10);
                let value: f64 = self
                    .lexeme()
                    .parse()
                    .map_err(|_| self.error(LexErrorKind::DecimalOutOfRange))?;
                if !value.is_finite() {
                    return Err(self.error(LexErrorKind::DecimalOutOfRange));
                }
                let mut token = self.make_token(TokenKind::Decimal);
                token.literal = Some(Literal::Float(value));
                return Ok(token);
            }

            let value: i64 = self
                .lexeme()
                .parse()
                .map_err(|_| self.error(LexErrorKind::IntegerOutOfRange))?;
            let mut token = self.make_token(TokenKind::Integer);
            token.literal = Some(Literal::Int(value));
            Ok(token)
        }

        fn scan_radix_integer(&mut self, radix: u32) -> Result<Token, LexicalError> {
            let digits_start = self.offset;
            self.eat_digits(radix);
            if self.offset == digits_start {
                return Err(self.error(LexErrorKind::MissingDigits { radix }));
            }

            let lexeme = self.lexeme();
            let digits = &self.source[digits_start..self.offset];
            let signed = if lexeme.starts_with('-') {
                format!("-{}", digits)
            } else {
                digits.to_string()
            };
            let value = i64::from_str_radix(&signed, radix)
                .map_err(|_| self.error(LexErrorKind::IntegerOutOfRange))?;

            let mut token = self.make_token(TokenKind::Integer);
            token.literal = Some(Literal::Int(value));
            Ok(token)
        }

        fn eat_digits(&mut self, radix: u32) {
            while let Some(c) = self.peek() {
                if c.is_digit(radix) {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        fn scan_string(&mut self) -> Result<Token, LexicalError> {
            let mut value = String::new();

            loop {
                match self.advance() {
                    Some('"') => break,
                    Some('\\') if self.peek() == Some('"') => {
                        self.advance();
                        value.push('"');
                    }
                    Some(c) => value.push(c),
                    None => return Err(self.error(LexErrorKind::UnterminatedString)),
                }
            }

            let mut token = self.make_token(TokenKind::String);
            token.literal = Some(Literal::String(value));
            Ok(token)
        }

        fn scan_char(&mut self) -> Result<Token, LexicalError> {
            let value = match self.advance() {
                Some('\'') => return Err(self.error(LexErrorKind::EmptyChar)),
                Some('\\') => match self.advance() {
                    Some(escaped) => unescape_char(escaped),
                    None => return Err(self.error(LexErrorKind::UnterminatedChar)),
                },
                Some(c) => c,
                None => return Err(self.error(LexErrorKind::UnterminatedChar)),
            };

            if self.advance() != Some('\'') {
                return Err(self.error(LexErrorKind::UnterminatedChar));
            }

            let mut token = self.make_token(TokenKind::Char);
            token.literal = Some(Literal::Char(value));
            Ok(token)
        }

        fn make_token(&self, kind: TokenKind) -> Token {
            Token {
                kind,
                lexeme: self.lexeme().to_string(),
                span: self.span(),
                literal: None,
            }
        }
    }

    fn radix_for_prefix(c: char) -> Option<u32> {
        match c {
            'x' | 'X' => Some(16),
            'o' | 'O' => Some(8),
            'b' | 'B' => Some(2),
            _ => None,
        }
    }

    fn unescape_char(escaped: char) -> char {
        match escaped {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            c => c,
        }
    }

    fn is_identifier_start(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_'
    }
    fn is_identifier_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '-'
    }
    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }
}
