//! Token types

use crate::util::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Punctuation
    LBrace,
    RBrace,
    Colon,
    Star,
    StarStar,
    Eq,
    LParen,
    RParen,
    Arrow,
    FatArrow,
    LBracket,
    RBracket,
    Dot,

    // Keywords (14 total)
    KwBlock,
    KwLet,
    KwFor,
    KwIn,
    KwStructOf,
    KwStruct,
    KwEnumOf,
    KwEnum,
    KwTraitOf,
    KwTrait,
    KwKindOf,
    KwKind,
    KwWhen,
    KwCase,

    // Literals and identifiers
    Bool,
    Ident,
    Integer,
    Decimal,
    String,
    Char,

    // Special
    Eof,
}

impl TokenKind {
    /// Keyword kind for an identifier-shaped word, if it is reserved
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "block" => TokenKind::KwBlock,
            "let" => TokenKind::KwLet,
            "for" => TokenKind::KwFor,
            "in" => TokenKind::KwIn,
            "structof" => TokenKind::KwStructOf,
            "struct" => TokenKind::KwStruct,
            "enumof" => TokenKind::KwEnumOf,
            "enum" => TokenKind::KwEnum,
            "traitof" => TokenKind::KwTraitOf,
            "trait" => TokenKind::KwTrait,
            "kindof" => TokenKind::KwKindOf,
            "kind" => TokenKind::KwKind,
            "when" => TokenKind::KwWhen,
            "case" => TokenKind::KwCase,
            _ => return None,
        };
        Some(kind)
    }

    /// Fixed source text of punctuation and keywords
    pub fn text(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Colon => ":",
            TokenKind::Star => "*",
            TokenKind::StarStar => "**",
            TokenKind::Eq => "=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Arrow => "->",
            TokenKind::FatArrow => "=>",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Dot => ".",
            TokenKind::KwBlock => "block",
            TokenKind::KwLet => "let",
            TokenKind::KwFor => "for",
            TokenKind::KwIn => "in",
            TokenKind::KwStructOf => "structof",
            TokenKind::KwStruct => "struct",
            TokenKind::KwEnumOf => "enumof",
            TokenKind::KwEnum => "enum",
            TokenKind::KwTraitOf => "traitof",
            TokenKind::KwTrait => "trait",
            TokenKind::KwKindOf => "kindof",
            TokenKind::KwKind => "kind",
            TokenKind::KwWhen => "when",
            TokenKind::KwCase => "case",
            _ => return None,
        };
        Some(text)
    }

    /// Whether this kind carries a literal value
    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Bool
                | TokenKind::Ident
                | TokenKind::Integer
                | TokenKind::Decimal
                | TokenKind::String
                | TokenKind::Char
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.text() {
            return write!(f, "'{}'", text);
        }
        let name = match self {
            TokenKind::Bool => "BOOL",
            TokenKind::Ident => "IDENT",
            TokenKind::Integer => "INTEGER",
            TokenKind::Decimal => "DECIMAL",
            TokenKind::String => "STRING",
            TokenKind::Char => "CHAR",
            _ => "<EOF>",
        };
        f.write_str(name)
    }
}

/// Token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text of the token
    pub lexeme: String,
    pub span: Span,
    pub literal: Option<Literal>,
}

impl Token {
    /// Byte offset of the first character
    #[inline]
    pub fn offset(&self) -> usize {
        self.span.start.offset
    }

    /// 1-indexed line of the first character
    #[inline]
    pub fn line(&self) -> usize {
        self.span.start.line
    }

    /// 1-indexed column of the first character
    #[inline]
    pub fn column(&self) -> usize {
        self.span.start.column
    }
}

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    String(String),
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Token {
            kind,
            lexeme: kind.text().unwrap_or_default().to_string(),
            span: Span::dummy(),
            literal: None,
        }
    }
}
