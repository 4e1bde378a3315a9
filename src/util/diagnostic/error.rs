//! Diagnostic data structures
//!
//! A [`Diagnostic`] carries a fully rendered message. Front end failures are
//! converted with [`Diagnostic::from_frontend_error`], which looks the error
//! up in the code registry and resolves its source span.

use crate::frontend::FrontendError;
use crate::util::diagnostic::codes::ErrorCode;
use crate::util::span::{SourceFile, Span};
use std::fmt;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// Diagnostic with a rendered message
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Registered error code, such as `E0201`
    pub code: String,
    pub message: String,
    pub help: String,
    pub span: Option<Span>,
    /// Follow-up notes rendered after the main report
    pub related: Vec<Diagnostic>,
}

impl Diagnostic {
    /// Create an error diagnostic for a registered code
    pub fn error(code: ErrorCode, message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.code.to_string(),
            message: message.into(),
            help: code.help.to_string(),
            span,
            related: Vec::new(),
        }
    }

    /// Replace the registry help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn with_related(mut self, related: Vec<Diagnostic>) -> Self {
        self.related = related;
        self
    }

    /// Build a diagnostic for a lexical or syntax error in `source`
    pub fn from_frontend_error(err: &FrontendError, source: &SourceFile) -> Self {
        match err {
            FrontendError::Lexical(e) => {
                let span = source.span_from_range(e.offset, e.offset + e.found.len());
                let message = format!("{}, found {:?}", e.kind, e.found);
                Diagnostic::error(ErrorCode::for_lexical(e.kind), message, Some(span))
            }
            FrontendError::Syntax(e) => {
                let span = source.span_from_range(e.offset, e.offset + e.lexeme.len());
                Diagnostic::error(ErrorCode::for_syntax(e), e.message(), Some(span))
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.severity, self.code, self.message)?;
        if let Some(span) = self.span.filter(|s| !s.is_dummy()) {
            write!(f, " at {}", span.start)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}
