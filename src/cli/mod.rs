//! CLI module for the brace tools
//!
//! ## Commands
//!
//! - `brace <file>` - Lint a file (default action)
//! - `fmt [path]` - Format `.js` files in place, or check/diff them
//! - `lint <file>` - Lint with rule toggles and optional JSON output
//! - `gen <file>` - Print the fixed-style generated source
//!
//! Debug flags `--lex`, `--parse` and `--resolve` dump one pipeline stage.
//!
//! ## Design
//!
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::format::FormatConfig;
use crate::lint::{LintConfig, LintRule};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Parser, resolver, linter and formatter for brace scripts
#[derive(Parser, Debug)]
#[command(name = "brace")]
#[command(version = VERSION)]
#[command(about = "Lint, format and inspect brace scripts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to lint (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with = "file")]
    pub lex_file: Option<PathBuf>,

    /// Parse only (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "file")]
    pub parse_file: Option<PathBuf>,

    /// Dump scopes, symbols and resolution findings (debug)
    #[arg(long = "resolve", value_name = "FILE", conflicts_with = "file")]
    pub resolve_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Format brace source files
    Fmt {
        /// File or directory to format
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,
        /// Check formatting without modifying files
        #[arg(long)]
        check: bool,
        /// Show diff of formatting changes
        #[arg(long)]
        diff: bool,
        /// Spaces per indentation level
        #[arg(long, value_name = "N", default_value_t = 2)]
        indent: usize,
        /// Keep object and array literals on one line
        #[arg(long)]
        compact: bool,
        /// No spaces around binary and assignment operators
        #[arg(long)]
        tight_operators: bool,
        /// No space after commas
        #[arg(long)]
        tight_commas: bool,
    },

    /// Lint a file
    Lint {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
        /// Disable a rule (undefined, unused, redeclared, no-var); repeatable
        #[arg(long = "allow", value_name = "RULE", value_parser = parse_rule)]
        allow: Vec<LintRule>,
    },

    /// Print fixed-style generated source
    Gen {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn parse_rule(name: &str) -> Result<LintRule, String> {
    LintRule::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = LintRule::ALL.iter().map(|rule| rule.as_str()).collect();
        format!("unknown rule '{}' (expected one of: {})", name, known.join(", "))
    })
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    // Handle debug flags first
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file.to_string_lossy());
    }
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file.to_string_lossy());
    }
    if let Some(file) = cli.resolve_file {
        return commands::resolve_file(&file.to_string_lossy());
    }

    match cli.command {
        Some(Command::Fmt {
            path,
            check,
            diff,
            indent,
            compact,
            tight_operators,
            tight_commas,
        }) => {
            let config = FormatConfig::default()
                .with_indent_width(indent)
                .with_break_long_constructs(!compact)
                .with_space_around_operators(!tight_operators)
                .with_space_after_comma(!tight_commas);
            commands::format_files(&path.to_string_lossy(), check, diff, &config)
        }
        Some(Command::Lint { file, json, allow }) => {
            let config = lint_config(&allow);
            commands::lint_file(&file.to_string_lossy(), &config, json)
        }
        Some(Command::Gen { file }) => commands::gen_file(&file.to_string_lossy()),
        None => {
            // Default: lint the file if provided
            if let Some(file) = cli.file {
                commands::lint_file(&file.to_string_lossy(), &LintConfig::default(), false)
            } else {
                // No command and no file - show help
                Err(CliError::new("", ExitCode::FAILURE))
            }
        }
    }
}

fn lint_config(allow: &[LintRule]) -> LintConfig {
    allow.iter().fold(LintConfig::default(), |config, rule| config.allow(*rule))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_default_file() {
        let cli = Cli::try_parse_from(["brace", "main.js"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("main.js")));
    }

    #[test]
    fn test_cli_parse_fmt_defaults() {
        let cli = Cli::try_parse_from(["brace", "fmt"]).unwrap();
        if let Some(Command::Fmt {
            path,
            check,
            diff,
            indent,
            compact,
            ..
        }) = cli.command
        {
            assert_eq!(path, PathBuf::from("."));
            assert!(!check && !diff && !compact);
            assert_eq!(indent, 2);
        } else {
            panic!("Expected Fmt command");
        }
    }

    #[test]
    fn test_cli_parse_fmt_options() {
        let cli = Cli::try_parse_from([
            "brace",
            "fmt",
            "src/",
            "--check",
            "--indent",
            "4",
            "--tight-operators",
            "--tight-commas",
        ])
        .unwrap();
        if let Some(Command::Fmt {
            check,
            indent,
            tight_operators,
            tight_commas,
            ..
        }) = cli.command
        {
            assert!(check && tight_operators && tight_commas);
            assert_eq!(indent, 4);
        } else {
            panic!("Expected Fmt command");
        }
    }

    #[test]
    fn test_cli_parse_lint_allow() {
        let cli = Cli::try_parse_from(["brace", "lint", "a.js", "--json", "--allow", "no-var", "--allow", "unused"])
            .unwrap();
        if let Some(Command::Lint { json, allow, .. }) = cli.command {
            assert!(json);
            assert_eq!(allow, vec![LintRule::NoVar, LintRule::Unused]);
            let config = lint_config(&allow);
            assert!(!config.no_var && !config.unused);
            assert!(config.undefined && config.redeclared);
        } else {
            panic!("Expected Lint command");
        }
    }

    #[test]
    fn test_cli_rejects_unknown_rule() {
        assert!(Cli::try_parse_from(["brace", "lint", "a.js", "--allow", "semicolons"]).is_err());
    }

    #[test]
    fn test_cli_parse_gen() {
        let cli = Cli::try_parse_from(["brace", "gen", "a.js"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Gen { .. })));
    }

    #[test]
    fn test_cli_debug_flags() {
        let cli = Cli::try_parse_from(["brace", "--resolve", "a.js"]).unwrap();
        assert_eq!(cli.resolve_file, Some(PathBuf::from("a.js")));
        assert!(Cli::try_parse_from(["brace", "--lex", "a.js", "b.js"]).is_err());
    }
}
