//! Iblang front-end driver
//!
//! Checks Iblang sources and dumps their tokens or syntax tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use iblang::frontend::lexer::Lexer;
use iblang::frontend::token::{Token, TokenKind};
use iblang::{ast, parse_source, Diagnostics, LineIndex};

/// Iblang front end
#[derive(Parser, Debug)]
#[command(name = "ibc")]
#[command(version)]
#[command(about = "Iblang front end - lexes and parses Iblang sources")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input source file (.ib)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Diagnostic output format
    #[arg(long, value_enum, default_value_t = Format::Human, global = true)]
    format: Format,

    /// Print at most N diagnostics
    #[arg(long, value_name = "N", global = true)]
    max_errors: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Human,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a source file for errors
    Check {
        /// Input source file
        input: PathBuf,
    },
    /// Print the syntax tree as JSON
    Parse {
        /// Input source file
        input: PathBuf,

        /// Leave source spans out of the tree
        #[arg(long)]
        no_spans: bool,
    },
    /// Print one token per line
    Tokens {
        /// Input source file
        input: PathBuf,
    },
    /// Print version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Run the selected command, returning the process exit code
fn run(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Some(Commands::Check { input }) => check_file(input, cli),
        Some(Commands::Parse { input, no_spans }) => parse_file(input, !no_spans, cli),
        Some(Commands::Tokens { input }) => dump_tokens(input, cli),
        Some(Commands::Version) => {
            println!("ibc {}", env!("CARGO_PKG_VERSION"));
            println!("Iblang front end");
            Ok(0)
        }
        None => match &cli.input {
            Some(input) => check_file(input, cli),
            None => {
                eprintln!("Error: No input file specified");
                eprintln!("Usage: ibc <FILE> or ibc check <FILE>");
                Ok(2)
            }
        },
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Print diagnostics in the selected format. JSON goes to stdout only when
/// it is the command's main output.
fn emit_diagnostics(
    diagnostics: &Diagnostics,
    path: &Path,
    source: &str,
    cli: &Cli,
    json_to_stdout: bool,
) {
    let file = path.display().to_string();
    match cli.format {
        Format::Human => {
            if diagnostics.is_empty() {
                return;
            }
            eprintln!("{}", diagnostics.render_human(&file, source, cli.max_errors));
            eprintln!(
                "{} error(s) found in {}",
                diagnostics.error_count(),
                file
            );
        }
        Format::Json => {
            let json = diagnostics.to_json(&file, source, cli.max_errors);
            if json_to_stdout {
                println!("{}", json);
            } else if !diagnostics.is_empty() {
                eprintln!("{}", json);
            }
        }
    }
}

fn exit_code(diagnostics: &Diagnostics) -> i32 {
    if diagnostics.has_errors() {
        1
    } else {
        0
    }
}

/// Parse a source file and report its diagnostics
fn check_file(input: &Path, cli: &Cli) -> Result<i32> {
    log::info!("checking {}", input.display());
    let source = read_source(input)?;
    let (module, diagnostics) = parse_source(&source, 0);

    emit_diagnostics(&diagnostics, input, &source, cli, true);
    if !diagnostics.has_errors() && cli.format == Format::Human {
        println!(
            "✅ {}: no errors found ({} items)",
            input.display(),
            module.items.len()
        );
    }
    Ok(exit_code(&diagnostics))
}

/// Print the tree as pretty JSON, diagnostics to stderr
fn parse_file(input: &Path, include_spans: bool, cli: &Cli) -> Result<i32> {
    let source = read_source(input)?;
    let (module, diagnostics) = parse_source(&source, 0);

    let tree = serde_json::to_string_pretty(&ast::to_json(&module, include_spans))
        .context("failed to serialize syntax tree")?;
    println!("{}", tree);

    emit_diagnostics(&diagnostics, input, &source, cli, false);
    Ok(exit_code(&diagnostics))
}

/// `line:col kind lexeme`, one token per line
fn dump_tokens(input: &Path, cli: &Cli) -> Result<i32> {
    let source = read_source(input)?;
    let mut lexer = Lexer::new(&source, 0);
    let tokens = lexer.tokenize();
    let index = LineIndex::new(&source);

    for token in &tokens {
        let (line, column) = index.line_col(token.span.start);
        println!("{}:{} {} {}", line, column, token_class(token), token.text);
    }

    let diagnostics = Diagnostics::from_errors(lexer.errors());
    emit_diagnostics(&diagnostics, input, &source, cli, false);
    Ok(exit_code(&diagnostics))
}

fn token_class(token: &Token) -> &'static str {
    match &token.kind {
        TokenKind::Ident(_) => "ident",
        TokenKind::Number => "number",
        TokenKind::StringLit(_) => "string",
        TokenKind::CharLit(_) => "char",
        TokenKind::Error => "error",
        TokenKind::Eof => "eof",
        kind if kind.is_keyword() => "keyword",
        _ => "punct",
    }
}
