//! Front end pipeline
//!
//! This module contains the lexer, parser and printer.
//! The front end turns source text into a [`Program`] and back.

use std::thread;
use thiserror::Error;
use tracing::{debug, warn};

pub mod lexer;
pub mod parser;
pub mod printer;

use lexer::tokens::Token;
use lexer::LexicalError;
use parser::ast::Program;
use parser::{ParserConfig, SyntaxError, STACK_PER_LEVEL};

/// Stack for everything around the recursive descent itself
const BASE_PARSER_STACK: usize = 1024 * 1024;

/// Largest stack requested for the parser thread
const MAX_PARSER_STACK: usize = 1024 * 1024 * 1024;

/// Front end context
#[derive(Debug, Clone, Default)]
pub struct Frontend {
    config: ParserConfig,
}

impl Frontend {
    /// Create a front end with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a front end with explicit parser settings
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Tokenize source text
    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, FrontendError> {
        debug!("Tokenizing source ({} bytes)", source.len());
        let tokens = lexer::tokenize(source)?;
        debug!("Tokenized into {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Tokenize and parse source text into a program
    pub fn parse(&self, source: &str) -> Result<Program, FrontendError> {
        let tokens = self.tokenize(source)?;

        debug!("Starting parsing...");
        let program = self.parse_tokens(&tokens)?;
        debug!("Parsing successful, got {} terms", program.len());

        Ok(program)
    }

    /// Stack the parser thread gets for the configured nesting limit
    pub fn parser_stack_size(&self) -> usize {
        self.config
            .max_depth
            .saturating_mul(STACK_PER_LEVEL)
            .saturating_add(BASE_PARSER_STACK)
            .min(MAX_PARSER_STACK)
    }

    /// Parse on a dedicated thread so the nesting limit, not the caller's
    /// stack, bounds the recursion
    fn parse_tokens(&self, tokens: &[Token]) -> Result<Program, SyntaxError> {
        let stack_size = self.parser_stack_size();
        thread::scope(|scope| {
            let spawned = thread::Builder::new()
                .name("shll-parser".into())
                .stack_size(stack_size)
                .spawn_scoped(scope, || parser::parse_program_with(tokens, &self.config));
            match spawned {
                Ok(handle) => match handle.join() {
                    Ok(result) => result,
                    Err(payload) => std::panic::resume_unwind(payload),
                },
                Err(err) => {
                    warn!("Cannot spawn parser thread ({}), parsing in place", err);
                    parser::parse_program_with(tokens, &self.config)
                }
            }
        })
    }
}

/// Parse source text with default settings
pub fn parse_source(source: &str) -> Result<Program, FrontendError> {
    Frontend::new().parse(source)
}

/// Front end errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrontendError {
    #[error("Lexical error: {0}")]
    Lexical(#[from] LexicalError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

impl FrontendError {
    /// 1-based line and column of the failure
    pub fn location(&self) -> (usize, usize) {
        match self {
            FrontendError::Lexical(e) => (e.line, e.column),
            FrontendError::Syntax(e) => (e.line, e.column),
        }
    }

    /// Byte offset of the failure
    pub fn offset(&self) -> usize {
        match self {
            FrontendError::Lexical(e) => e.offset,
            FrontendError::Syntax(e) => e.offset,
        }
    }
}
