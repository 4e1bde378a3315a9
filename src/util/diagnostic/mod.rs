//! Diagnostics
//!
//! Turns front end errors into coded, source-located reports and renders
//! them for the terminal.
//!
//! # Example
//!
//! ```
//! use shll::frontend::parse_source;
//! use shll::util::diagnostic::{Diagnostic, EmitterConfig, TextEmitter};
//! use shll::util::span::SourceFile;
//!
//! let source = SourceFile::new("demo.shll", "let = 1");
//! let err = parse_source(&source.content).unwrap_err();
//! let diagnostic = Diagnostic::from_frontend_error(&err, &source);
//! let emitter = TextEmitter::with_config(EmitterConfig { use_colors: false, ..Default::default() });
//! let output = emitter.render_with_source(&diagnostic, Some(&source));
//! assert!(output.starts_with("error [E0201]"));
//! ```

pub mod codes;
pub mod emitter;
mod error;

pub use codes::ErrorCode;
pub use emitter::{DiagnosticEmitter, EmitterConfig, TextEmitter};
pub use error::{Diagnostic, Severity};
