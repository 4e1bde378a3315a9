//! Parser state and token stream management

use super::super::lexer::tokens::*;
use super::{ParserConfig, Rule, SyntaxError, SyntaxErrorKind, TokenSet};
use tracing::trace;

/// Tokens that can start a `term` head
pub(crate) const TERM_START: &[TokenKind] = &[
    TokenKind::KwBlock,
    TokenKind::LBracket,
    TokenKind::KwLet,
    TokenKind::KwFor,
    TokenKind::KwStructOf,
    TokenKind::KwStruct,
    TokenKind::KwEnumOf,
    TokenKind::KwEnum,
    TokenKind::KwTraitOf,
    TokenKind::KwTrait,
    TokenKind::LParen,
    TokenKind::KwKindOf,
    TokenKind::KwKind,
    TokenKind::KwCase,
    TokenKind::Star,
    TokenKind::StarStar,
    TokenKind::Bool,
    TokenKind::Ident,
    TokenKind::Integer,
    TokenKind::Decimal,
    TokenKind::String,
    TokenKind::Char,
];

/// Term starters plus the extra kinds a rule also accepts
pub(crate) fn term_start_or(extra: &[TokenKind]) -> TokenSet {
    TokenSet(TERM_START.iter().chain(extra).copied().collect())
}

/// Limits on how the top level of a term is read, mostly what its postfix
/// chain may absorb. Terms nested inside brackets are always parsed
/// unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Restrictions {
    /// Leave a trailing `= term` to the enclosing rule
    pub no_assign: bool,
    /// Leave a trailing `{ ... }` to the enclosing rule
    pub no_named_applier: bool,
    /// Read `(..) -> ret` as a funof even when `=>` follows the return term
    pub prefer_funof: bool,
}

impl Restrictions {
    pub const NONE: Restrictions = Restrictions {
        no_assign: false,
        no_named_applier: false,
        prefer_funof: false,
    };
    pub const NO_ASSIGN: Restrictions = Restrictions {
        no_assign: true,
        no_named_applier: false,
        prefer_funof: false,
    };
    pub const NO_NAMED_APPLIER: Restrictions = Restrictions {
        no_assign: false,
        no_named_applier: true,
        prefer_funof: false,
    };
    pub const PREFER_FUNOF: Restrictions = Restrictions {
        no_assign: false,
        no_named_applier: false,
        prefer_funof: true,
    };
}

/// Saved cursor for speculative parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    pos: usize,
    depth: usize,
}

/// Parser state for tracking position and nesting
#[derive(Debug)]
pub struct ParserState<'a> {
    /// Token stream
    tokens: &'a [Token],
    /// Current position in token stream
    pos: usize,
    /// Current term nesting
    depth: usize,
    max_depth: usize,
}

impl<'a> ParserState<'a> {
    /// Create a new parser state
    #[inline]
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_config(tokens, &ParserConfig::default())
    }

    /// Create a parser state with explicit settings
    pub fn with_config(tokens: &'a [Token], config: &ParserConfig) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth: config.max_depth,
        }
    }

    /// Check if at end of token stream
    #[inline]
    pub fn at_end(&self) -> bool {
        self.kind() == TokenKind::Eof
    }

    /// Get current token
    #[inline]
    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Kind of the current token; a missing token reads as `Eof`
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.nth_kind(0)
    }

    /// Kind of the token `n` ahead of the cursor
    #[inline]
    pub fn nth_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    /// Check the current token kind
    #[inline]
    pub fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Current position in the token stream
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Advance to next token
    #[inline]
    pub fn bump(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    /// Skip a specific token
    #[inline]
    pub fn skip(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail with an error for `rule`
    pub fn expect(&mut self, kind: TokenKind, rule: Rule) -> Result<&'a Token, SyntaxError> {
        match self.current() {
            Some(token) if token.kind == kind => {
                self.bump();
                Ok(token)
            }
            _ => Err(self.unexpected(rule, [kind])),
        }
    }

    /// Consume an identifier and return its text
    pub fn expect_ident(&mut self, rule: Rule) -> Result<&'a str, SyntaxError> {
        self.expect(TokenKind::Ident, rule)
            .map(|token| token.lexeme.as_str())
    }

    /// Build an error for the current token
    pub fn unexpected(&self, rule: Rule, expected: impl Into<TokenSet>) -> SyntaxError {
        self.error_here(rule, expected.into(), SyntaxErrorKind::UnexpectedToken)
    }

    fn error_here(&self, rule: Rule, expected: TokenSet, kind: SyntaxErrorKind) -> SyntaxError {
        let (offset, line, column, lexeme) = match self.current() {
            Some(token) => (
                token.offset(),
                token.line(),
                token.column(),
                token.lexeme.clone(),
            ),
            // Hand-built streams may lack Eof; point past the last token
            None => self
                .tokens
                .last()
                .map(|t| (t.span.end.offset, t.span.end.line, t.span.end.column, String::new()))
                .unwrap_or((0, 1, 1, String::new())),
        };
        SyntaxError {
            offset,
            line,
            column,
            rule,
            expected,
            found: self.kind(),
            lexeme,
            kind,
        }
    }

    /// Enter a nested term, failing once the nesting limit is passed
    pub(crate) fn descend(&mut self) -> Result<(), SyntaxError> {
        if self.depth >= self.max_depth {
            return Err(self.error_here(
                Rule::Term,
                TokenSet::default(),
                SyntaxErrorKind::NestingTooDeep {
                    limit: self.max_depth,
                },
            ));
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave a nested term
    #[inline]
    pub(crate) fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Save the cursor
    #[inline]
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            depth: self.depth,
        }
    }

    /// Move the cursor to an absolute token index
    #[inline]
    pub(crate) fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len());
    }

    /// Rewind to a saved cursor
    #[inline]
    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.depth = checkpoint.depth;
    }

    /// Run `parse`, rewinding the cursor if it fails. Hitting the nesting
    /// limit is never rolled back.
    pub(crate) fn speculate<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<Option<T>, SyntaxError> {
        let checkpoint = self.checkpoint();
        match parse(self) {
            Ok(value) => Ok(Some(value)),
            Err(err) if matches!(err.kind, SyntaxErrorKind::NestingTooDeep { .. }) => Err(err),
            Err(err) => {
                trace!(
                    "rolled back to token {} after {} in {}",
                    checkpoint.pos,
                    err.found,
                    err.rule
                );
                self.restore(checkpoint);
                Ok(None)
            }
        }
    }

    /// Index of the token closing the bracket at the cursor, counting
    /// `(`/`)`, `[`/`]` and `{`/`}` together
    pub(crate) fn matching_close(&self) -> Option<usize> {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(self.pos) {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                TokenKind::Eof => return None,
                _ => {}
            }
        }
        None
    }

    /// Index of the token opening the bracket closed at `close`
    pub(crate) fn matching_open(&self, close: usize) -> Option<usize> {
        let mut depth = 0usize;
        for i in (0..=close.min(self.tokens.len().checked_sub(1)?)).rev() {
            match self.tokens[i].kind {
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => depth += 1,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Kind of the token at an absolute index
    #[inline]
    pub(crate) fn kind_at(&self, index: usize) -> TokenKind {
        self.tokens
            .get(index)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    /// Check if current token can start a term
    #[inline]
    pub fn can_start_term(&self) -> bool {
        TERM_START.contains(&self.kind())
    }
}
