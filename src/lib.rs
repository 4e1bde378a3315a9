//! SHLL front end
//!
//! Tokenizer, recursive-descent parser and printer for the SHLL term
//! language.
//!
//! # Example
//!
//! ```
//! use shll::frontend::parse_source;
//!
//! let program = parse_source("let id = (x) => x\nid(42)").unwrap();
//! assert_eq!(program.len(), 2);
//! assert_eq!(program.to_string(), "let id = (x) => x\nid(42)");
//! ```

#![doc(html_root_url = "https://docs.rs/shll")]
#![warn(rust_2018_idioms)]

pub mod frontend;
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use frontend::parser::ast::Program;
pub use frontend::{parse_source, Frontend, FrontendError};

use crate::frontend::printer::{print_program, PrettyConfig};
use crate::util::config::OutputFormat;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "SHLL";

/// Read and parse a source file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// fn main() -> shll::Result<()> {
///     let program = shll::parse_file(Path::new("main.shll"))?;
///     println!("{}", program);
///     Ok(())
/// }
/// ```
pub fn parse_file(path: &Path) -> Result<Program> {
    debug!("Reading {}", path.display());
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let program =
        parse_source(&source).with_context(|| format!("Failed to parse: {}", path.display()))?;
    Ok(program)
}

/// Render a program in the requested dump format
pub fn render_program(program: &Program, format: OutputFormat, pretty: &PrettyConfig) -> Result<String> {
    let text = match format {
        OutputFormat::Debug => format!("{:#?}", program),
        OutputFormat::Json => serde_json::to_string_pretty(program).context("Failed to encode JSON")?,
        OutputFormat::Ron => ron::ser::to_string_pretty(program, ron::ser::PrettyConfig::default())
            .context("Failed to encode RON")?,
        OutputFormat::Pretty => print_program(program, pretty),
    };
    Ok(text)
}
