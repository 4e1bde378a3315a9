//! Diagnostic output

pub mod text;

pub use text::{EmitterConfig, TextEmitter};

use crate::util::diagnostic::Diagnostic;

/// Renders diagnostics to text
pub trait DiagnosticEmitter {
    fn emit(&self, diagnostic: &Diagnostic) -> String;
}
