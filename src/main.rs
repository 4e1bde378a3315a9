//! SHLL - CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shll::frontend::printer::print_program;
use shll::frontend::Frontend;
use shll::util::config::{resolve_config, OutputFormat, ShllConfig};
use shll::util::diagnostic::{Diagnostic, EmitterConfig, ErrorCode, TextEmitter};
use shll::util::logger::{self, LogLevel};
use shll::util::span::SourceFile;
use shll::{render_program, NAME, VERSION};
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

/// Tokenizer, parser and formatter for the SHLL term language
#[derive(Parser, Debug)]
#[command(name = "shll")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file, overriding ./shll.toml and the user config
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tokens of a source file
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse a source file or inline code and dump the AST
    Parse {
        /// Source file to parse
        #[arg(value_name = "FILE", required_unless_present = "eval")]
        file: Option<PathBuf>,

        /// Parse CODE instead of a file
        #[arg(short, long = "eval", value_name = "CODE", conflicts_with = "file")]
        eval: Option<String>,

        /// Dump format, defaults to the configured one
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Check a source file for syntax errors
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Pretty print a source file
    Fmt {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Exit with status 1 if the file is not formatted instead of printing it
        #[arg(long)]
        check: bool,
    },

    /// Explain an error code, such as E0201
    Explain {
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Print version information
    Version,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let config = resolve_config(args.config.as_deref(), &cwd).context("Failed to load configuration")?;

    let level = if args.verbose { LogLevel::Debug } else { config.log.level };
    logger::init_with_level(level);
    debug!("Using configuration {:?}", config);

    let frontend = Frontend::with_config(config.parser.clone());

    match args.command {
        Commands::Tokens { file } => {
            let source = read_source(&file)?;
            let tokens = match frontend.tokenize(&source.content) {
                Ok(tokens) => tokens,
                Err(err) => return Ok(report(&Diagnostic::from_frontend_error(&err, &source), &source)),
            };
            for token in &tokens {
                println!("{}:{} {:?} {}", token.line(), token.column(), token.kind, token.lexeme);
            }
        }
        Commands::Parse { file, eval, format } => {
            let source = match (file, eval) {
                (_, Some(code)) => SourceFile::new("<eval>", code),
                (Some(file), None) => read_source(&file)?,
                (None, None) => bail!("Either FILE or --eval is required"),
            };
            let program = match frontend.parse(&source.content) {
                Ok(program) => program,
                Err(err) => return Ok(report(&Diagnostic::from_frontend_error(&err, &source), &source)),
            };
            let format = format.unwrap_or(config.output.format);
            let text = render_program(&program, format, &config.output.pretty())?;
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
        Commands::Check { file } => {
            let source = read_source(&file)?;
            if let Err(err) = frontend.parse(&source.content) {
                return Ok(report(&Diagnostic::from_frontend_error(&err, &source), &source));
            }
            println!("ok");
        }
        Commands::Fmt { file, check } => {
            let source = read_source(&file)?;
            let program = match frontend.parse(&source.content) {
                Ok(program) => program,
                Err(err) => return Ok(report(&Diagnostic::from_frontend_error(&err, &source), &source)),
            };
            let formatted = print_program(&program, &config.output.pretty());
            if check {
                if formatted != source.content {
                    eprintln!("{} is not formatted", file.display());
                    return Ok(ExitCode::FAILURE);
                }
            } else {
                print!("{}", formatted);
            }
        }
        Commands::Explain { code } => {
            let Some(entry) = ErrorCode::find(&code.to_ascii_uppercase()) else {
                bail!("Unknown error code: {}", code);
            };
            println!("{}: {}", entry.code, entry.title);
            println!("help: {}", entry.help);
        }
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
            if args.verbose {
                println!("Host: {}", std::env::consts::OS);
                print!("{}", toml_summary(&config)?);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_source(path: &Path) -> Result<SourceFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(SourceFile::new(path.display().to_string(), content))
}

/// Print a diagnostic to stderr and return the failure status
fn report(diagnostic: &Diagnostic, source: &SourceFile) -> ExitCode {
    let emitter = TextEmitter::with_config(EmitterConfig {
        use_colors: std::io::stderr().is_terminal(),
        ..Default::default()
    });
    eprint!("{}", emitter.render_with_source(diagnostic, Some(source)));
    ExitCode::FAILURE
}

fn toml_summary(config: &ShllConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to encode configuration")
}
