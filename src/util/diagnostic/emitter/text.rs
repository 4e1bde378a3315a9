//! Plain text renderer
//!
//! ```text
//! error [E0201] unexpected INTEGER "42" in let, expected IDENT
//!  --> main.shll:2:5
//!    2 | let 42
//!      |     ^^
//! help: check the surrounding brackets and keywords
//! ```

use crate::util::diagnostic::emitter::DiagnosticEmitter;
use crate::util::diagnostic::{Diagnostic, Severity};
use crate::util::span::SourceFile;

/// Renderer settings
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Wrap severity and code in ANSI colors
    pub use_colors: bool,
    pub show_source: bool,
    pub show_help: bool,
    pub show_related: bool,
    pub show_line_numbers: bool,
    /// Character used to underline the span
    pub indicator: char,
    /// Maximum source lines shown per diagnostic
    pub max_lines: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_source: true,
            show_help: true,
            show_related: true,
            show_line_numbers: true,
            indicator: '^',
            max_lines: 6,
        }
    }
}

/// Text diagnostic renderer
#[derive(Debug, Clone)]
pub struct TextEmitter {
    config: EmitterConfig,
}

impl TextEmitter {
    pub fn new() -> Self {
        Self {
            config: EmitterConfig::default(),
        }
    }

    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// Render without source text; only the header and help are shown
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        self.render_internal(diagnostic, None)
    }

    /// Render with the snippet taken from `source_file`
    pub fn render_with_source(&self, diagnostic: &Diagnostic, source_file: Option<&SourceFile>) -> String {
        self.render_internal(diagnostic, source_file)
    }

    fn render_internal(&self, diagnostic: &Diagnostic, source_file: Option<&SourceFile>) -> String {
        let mut output = String::new();

        output.push_str(&self.render_header(diagnostic));
        output.push_str(&self.render_location(diagnostic, source_file));

        if self.config.show_source {
            if let Some(snippet) = self.render_source_snippet(diagnostic, source_file) {
                output.push_str(&snippet);
            }
        }

        if self.config.show_help && !diagnostic.help.is_empty() {
            output.push_str("help: ");
            output.push_str(&diagnostic.help);
            output.push('\n');
        }

        if self.config.show_related {
            for related in &diagnostic.related {
                output.push_str(&self.render_internal(related, source_file));
            }
        }

        output
    }

    fn render_header(&self, diagnostic: &Diagnostic) -> String {
        let severity = diagnostic.severity.to_string();
        if diagnostic.code.is_empty() {
            format!("{}: {}\n", self.color(diagnostic.severity.into(), &severity), diagnostic.message)
        } else {
            format!(
                "{} [{}] {}\n",
                self.color(diagnostic.severity.into(), &severity),
                self.color(Style::Bold, &diagnostic.code),
                diagnostic.message
            )
        }
    }

    fn render_location(&self, diagnostic: &Diagnostic, source_file: Option<&SourceFile>) -> String {
        match &diagnostic.span {
            Some(span) if !span.is_dummy() => {
                let file_name = source_file.map(|sf| sf.name.as_str()).unwrap_or("<unknown>");
                format!(" --> {}:{}:{}\n", file_name, span.start.line, span.start.column)
            }
            _ => String::new(),
        }
    }

    fn render_source_snippet(&self, diagnostic: &Diagnostic, source_file: Option<&SourceFile>) -> Option<String> {
        let span = diagnostic.span.as_ref()?;
        if span.is_dummy() {
            return None;
        }
        let source_file = source_file?;
        let start_line = span.start.line;
        let end_line = span.end.line.max(start_line);

        let lines_to_show = (end_line - start_line + 1).min(self.config.max_lines);
        let mut output = String::new();

        for i in 0..lines_to_show {
            let line_num = start_line + i;
            let Some(line) = source_file.line_text(line_num) else {
                break;
            };
            if self.config.show_line_numbers {
                output.push_str(&format!("{:>4} | ", line_num));
            } else {
                output.push_str("     | ");
            }
            output.push_str(line);
            output.push('\n');

            // Underline the span on its first line only
            if i == 0 {
                let spaces = " ".repeat(span.start.column.saturating_sub(1));
                let indicator_len = if start_line == end_line {
                    span.end.column.saturating_sub(span.start.column).max(1)
                } else {
                    line.chars()
                        .count()
                        .saturating_sub(span.start.column - 1)
                        .max(1)
                };
                let indicators = self.config.indicator.to_string().repeat(indicator_len);
                output.push_str(&format!("     | {}{}\n", spaces, indicators));
            }
        }

        Some(output)
    }

    fn color(&self, style: Style, text: &str) -> String {
        if !self.config.use_colors {
            return text.to_string();
        }
        let code = match style {
            Style::Red => "31",
            Style::Yellow => "33",
            Style::Blue => "34",
            Style::Cyan => "36",
            Style::Bold => "1",
        };
        format!("\x1b[{}m{}\x1b[0m", code, text)
    }
}

#[derive(Debug, Clone, Copy)]
enum Style {
    Red,
    Yellow,
    Blue,
    Cyan,
    Bold,
}

impl From<Severity> for Style {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => Style::Red,
            Severity::Warning => Style::Yellow,
            Severity::Info => Style::Blue,
            Severity::Hint => Style::Cyan,
        }
    }
}

impl Default for TextEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticEmitter for TextEmitter {
    fn emit(&self, diagnostic: &Diagnostic) -> String {
        self.render(diagnostic)
    }
}
