//! Parser module
//!
//! Hand-written recursive-descent parser for SHLL. Heads are parsed by
//! [`head`], postfix chains are folded iteratively by [`postfix`], and the
//! keyword-led declarations live in [`decl`]. Ambiguous spots (`arg` vs
//! `kwArg`, the three `for` forms, `fun` vs `funof`) are settled with
//! bounded lookahead or a checkpoint/rollback on [`ParserState`].

pub mod ast;
mod args;
mod decl;
mod head;
mod postfix;
mod state;

pub use state::{ParserState, Restrictions};

use crate::frontend::lexer::tokens::*;
use ast::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Default limit on nesting levels. A level is a nested term or a folded
/// postfix link.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Stack an unoptimized build may use per nesting level
pub const STACK_PER_LEVEL: usize = 32 * 1024;

/// Parser settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Maximum nesting of terms before parsing stops with an error
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse tokens into a program
///
/// The parser recurses once per nesting level, so the calling thread needs
/// about `max_depth * STACK_PER_LEVEL` bytes of stack in debug builds.
/// [`Frontend::parse`](crate::frontend::Frontend::parse) runs on a thread
/// sized for the configured limit.
///
/// # Arguments
/// * `tokens` - Token stream from the lexer
///
/// # Returns
/// Parsed program or the first syntax error
///
/// # Example
/// ```shll
/// let id = (x) => x
/// id(42)
/// ```
pub fn parse_program(tokens: &[Token]) -> Result<Program, SyntaxError> {
    parse_program_with(tokens, &ParserConfig::default())
}

/// Parse tokens into a program using explicit settings
pub fn parse_program_with(
    tokens: &[Token],
    config: &ParserConfig,
) -> Result<Program, SyntaxError> {
    let mut state = ParserState::with_config(tokens, config);
    let mut terms = Vec::new();

    while !state.at_end() {
        terms.push(state.parse_term()?);
    }
    state.expect(TokenKind::Eof, Rule::Program)?;

    debug!("Parsed {} top-level terms", terms.len());
    Ok(Program { terms })
}

/// Parse a single term that must span the whole token stream
pub fn parse_term(tokens: &[Token]) -> Result<Term, SyntaxError> {
    let mut state = ParserState::new(tokens);
    let term = state.parse_term()?;
    state.expect(TokenKind::Eof, Rule::Program)?;
    Ok(term)
}

/// Grammar rule active when a syntax error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    Program,
    Term,
    Blocked,
    Block,
    Anno,
    Param,
    KwArg,
    Arg,
    Let,
    For,
    StructOf,
    Struct,
    EnumOf,
    Enum,
    TraitOf,
    Trait,
    FunOf,
    Fun,
    FatArrow,
    KindOf,
    Kind,
    When,
    Case,
    Generic,
    Deref,
    Selector,
    ImplicitApplier,
    PositionalApplier,
    NamedApplier,
    Assigner,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Program => "program",
            Rule::Term => "term",
            Rule::Blocked => "blocked",
            Rule::Block => "block",
            Rule::Anno => "anno",
            Rule::Param => "param",
            Rule::KwArg => "kwArg",
            Rule::Arg => "arg",
            Rule::Let => "let",
            Rule::For => "for",
            Rule::StructOf => "structof",
            Rule::Struct => "struct",
            Rule::EnumOf => "enumof",
            Rule::Enum => "enum",
            Rule::TraitOf => "traitof",
            Rule::Trait => "trait",
            Rule::FunOf => "funof",
            Rule::Fun => "fun",
            Rule::FatArrow => "fatArrow",
            Rule::KindOf => "kindof",
            Rule::Kind => "kind",
            Rule::When => "when",
            Rule::Case => "case",
            Rule::Generic => "generic",
            Rule::Deref => "deref",
            Rule::Selector => "selector",
            Rule::ImplicitApplier => "implicitApplier",
            Rule::PositionalApplier => "positionalApplier",
            Rule::NamedApplier => "namedApplier",
            Rule::Assigner => "assigner",
        };
        f.write_str(name)
    }
}

/// Set of token kinds a rule would have accepted
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenSet(pub BTreeSet<TokenKind>);

impl TokenSet {
    pub fn contains(&self, kind: TokenKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[TokenKind; N]> for TokenSet {
    fn from(kinds: [TokenKind; N]) -> Self {
        TokenSet(kinds.into_iter().collect())
    }
}

impl From<&[TokenKind]> for TokenSet {
    fn from(kinds: &[TokenKind]) -> Self {
        TokenSet(kinds.iter().copied().collect())
    }
}

impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds = self.0.iter();
        match kinds.next() {
            None => f.write_str("nothing"),
            Some(first) if self.0.len() == 1 => write!(f, "{}", first),
            Some(first) => {
                write!(f, "one of {}", first)?;
                for kind in kinds {
                    write!(f, ", {}", kind)?;
                }
                Ok(())
            }
        }
    }
}

/// Why a rule rejected its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyntaxErrorKind {
    /// The token matched no alternative of the rule
    UnexpectedToken,
    /// Terms nested deeper than the configured limit
    NestingTooDeep { limit: usize },
}

/// Parse error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", self.describe())]
pub struct SyntaxError {
    /// Byte offset of the offending token
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub rule: Rule,
    pub expected: TokenSet,
    pub found: TokenKind,
    /// Source text of the offending token
    pub lexeme: String,
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    /// Error text without the location prefix
    pub fn message(&self) -> String {
        let found = if self.found == TokenKind::Eof {
            "end of input".to_string()
        } else {
            format!("{} {:?}", self.found, self.lexeme)
        };
        match self.kind {
            SyntaxErrorKind::UnexpectedToken => format!(
                "unexpected {} in {}, expected {}",
                found, self.rule, self.expected
            ),
            SyntaxErrorKind::NestingTooDeep { limit } => {
                format!("terms nested deeper than {} at {}", limit, found)
            }
        }
    }

    fn describe(&self) -> String {
        format!("{}:{}: {}", self.line, self.column, self.message())
    }
}

#[cfg(test)]
mod tests;
