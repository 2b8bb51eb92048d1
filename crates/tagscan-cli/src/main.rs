use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Once;

use tagscan_lexer::{LexerError, ScanOutput, Scanner};

/// Bad command-line invocation.
const EXIT_USAGE: i32 = 64;
/// The source scanned, but with diagnostics.
const EXIT_DATA_ERROR: i32 = 65;
/// The input file could not be read.
const EXIT_NO_INPUT: i32 = 66;

const DEFAULT_SOURCE: &str = "file.txt";

#[derive(Parser, Debug)]
#[command(name = "tagscan")]
#[command(about = "tagscan: lexical scanner for sequence definitions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Scan a file and print its tokens
    Scan {
        /// Input source file
        #[arg(default_value = DEFAULT_SOURCE)]
        path: String,
    },

    /// Scan a file and only report diagnostics
    Check {
        /// Input source file
        #[arg(default_value = DEFAULT_SOURCE)]
        path: String,
    },

    /// Scan lines typed at an interactive prompt
    Repl,
}

impl Cli {
    fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Scan {
            path: DEFAULT_SOURCE.into(),
        })
    }
}

static TRACING_INIT: Once = Once::new();

/// Install a stderr log subscriber. Only active when `RUST_LOG` is set,
/// e.g. `RUST_LOG=tagscan_lexer=trace`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { EXIT_USAGE } else { 0 });
        }
    };

    match cli.into_command() {
        Command::Scan { path } => cmd_scan(&path),
        Command::Check { path } => cmd_check(&path),
        Command::Repl => cmd_repl(),
    }
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(EXIT_NO_INPUT);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(EXIT_NO_INPUT);
        }
    }
}

fn cmd_scan(path: &str) {
    let source = read_source(path);
    tracing::debug!(path, bytes = source.len(), "scanning file");

    let output = Scanner::tokenize(&source);
    for line in token_lines(&output) {
        println!("{line}");
    }
    report(&output.diagnostics);

    if output.has_errors() {
        println!("\nFailure!");
        std::process::exit(EXIT_DATA_ERROR);
    }
    println!("\nSUCCESS!");
}

fn cmd_check(path: &str) {
    let source = read_source(path);

    let output = Scanner::tokenize(&source);
    report(&output.diagnostics);

    if output.has_errors() {
        std::process::exit(EXIT_DATA_ERROR);
    }
    eprintln!("OK: {path}");
}

fn cmd_repl() {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Error reading input: {e}");
                return;
            }
            None => return,
        };

        // Each line is a fresh scan, so errors never carry over.
        let output = Scanner::tokenize(&line);
        for token_line in token_lines(&output) {
            println!("{token_line}");
        }
        report(&output.diagnostics);
    }
}

/// One printable line per token, in source order.
fn token_lines(output: &ScanOutput) -> Vec<String> {
    output.tokens.iter().map(ToString::to_string).collect()
}

fn report(diagnostics: &[LexerError]) {
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("tagscan").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_arguments_scans_default_file() {
        let cli = parse(&[]).unwrap();
        assert_eq!(
            cli.into_command(),
            Command::Scan {
                path: "file.txt".into()
            }
        );
    }

    #[test]
    fn test_scan_with_path() {
        let cli = parse(&["scan", "orders.seq"]).unwrap();
        assert_eq!(
            cli.into_command(),
            Command::Scan {
                path: "orders.seq".into()
            }
        );
    }

    #[test]
    fn test_check_defaults_path() {
        let cli = parse(&["check"]).unwrap();
        assert_eq!(
            cli.into_command(),
            Command::Check {
                path: "file.txt".into()
            }
        );
    }

    #[test]
    fn test_repl() {
        assert_eq!(parse(&["repl"]).unwrap().into_command(), Command::Repl);
    }

    #[test]
    fn test_bad_invocation_is_usage_error() {
        let err = parse(&["scan", "a", "b"]).unwrap_err();
        assert!(err.use_stderr());
        let err = parse(&["frobnicate"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_help_is_not_usage_error() {
        let err = parse(&["--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }

    #[test]
    fn test_token_lines() {
        let output = Scanner::tokenize("x ::= 1.5 \"s\"");
        assert_eq!(
            token_lines(&output),
            vec![
                "IDENTIFIER x null",
                "ASSIGNMENT ::= null",
                "NUMBER 1.5 1.5",
                "STRING \"s\" s",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_clap_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
