//! Error code registry
//!
//! `E01xx` codes are lexical, `E02xx` codes are syntactic.

use crate::frontend::lexer::LexErrorKind;
use crate::frontend::parser::{SyntaxError, SyntaxErrorKind};
use crate::frontend::lexer::tokens::TokenKind;

/// Registered error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    pub code: &'static str,
    /// Short name of the error class
    pub title: &'static str,
    /// Generic advice, shown when the error has no more specific hint
    pub help: &'static str,
}

macro_rules! error_codes {
    ($($name:ident = $code:literal, $title:literal, $help:literal;)*) => {
        $(
            pub const $name: ErrorCode = ErrorCode {
                code: $code,
                title: $title,
                help: $help,
            };
        )*

        /// Every registered code, in numeric order
        pub const ALL: &[ErrorCode] = &[$($name),*];
    };
}

error_codes! {
    E0101 = "E0101", "unexpected character",
        "remove the character or put it inside a string literal";
    E0102 = "E0102", "unterminated string literal",
        "close the string with '\"'";
    E0103 = "E0103", "unterminated character literal",
        "a character literal holds exactly one character between single quotes";
    E0104 = "E0104", "empty character literal",
        "a character literal holds exactly one character between single quotes";
    E0105 = "E0105", "unterminated block comment",
        "close the comment with '*/'; block comments do not nest";
    E0106 = "E0106", "missing digits after base prefix",
        "write at least one digit after 0x, 0o or 0b";
    E0107 = "E0107", "integer literal out of range",
        "integer literals must fit in a signed 64-bit integer";
    E0108 = "E0108", "decimal literal out of range",
        "decimal literals must be finite 64-bit floats";
    E0201 = "E0201", "unexpected token",
        "check the surrounding brackets and keywords";
    E0202 = "E0202", "unexpected end of input",
        "the input ends inside an unfinished term; check for a missing closing bracket";
    E0203 = "E0203", "nesting too deep",
        "flatten the input or raise `max_depth` in the [parser] section of shll.toml";
}

impl ErrorCode {
    /// Look up a code by its text
    pub fn find(code: &str) -> Option<ErrorCode> {
        ALL.iter().copied().find(|c| c.code == code)
    }

    /// Code for a lexical error
    pub fn for_lexical(kind: LexErrorKind) -> ErrorCode {
        match kind {
            LexErrorKind::UnexpectedChar => E0101,
            LexErrorKind::UnterminatedString => E0102,
            LexErrorKind::UnterminatedChar => E0103,
            LexErrorKind::EmptyChar => E0104,
            LexErrorKind::UnterminatedComment => E0105,
            LexErrorKind::MissingDigits { .. } => E0106,
            LexErrorKind::IntegerOutOfRange => E0107,
            LexErrorKind::DecimalOutOfRange => E0108,
        }
    }

    /// Code for a syntax error
    pub fn for_syntax(err: &SyntaxError) -> ErrorCode {
        match err.kind {
            SyntaxErrorKind::NestingTooDeep { .. } => E0203,
            SyntaxErrorKind::UnexpectedToken if err.found == TokenKind::Eof => E0202,
            SyntaxErrorKind::UnexpectedToken => E0201,
        }
    }
}
