#![forbid(unsafe_code)]
//! brace: tooling for a small curly-brace scripting language
//!
//! The syntax frontend (lexer, parser, AST, syntax errors) lives in the `brace_syntax` crate.
//! This crate adds name resolution, linting, formatting, a fixed-style code generator and the
//! `brace` command-line tool.
//!
//! ## Pipeline
//!
//! ```rust
//! let program = brace::parse_source("let a = 1; log(a);").unwrap();
//! let resolution = brace::resolve(&program);
//! assert_eq!(resolution.undefined[0].name, "log");
//!
//! let findings = brace::lint(&program);
//! assert_eq!(findings[0].message, "Undefined variable: 'log'");
//!
//! assert_eq!(brace::format_source("let a=1").unwrap(), "let a = 1;\n");
//! ```
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`. Malformed input is always reported as an error value,
//!   never a panic.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod codegen;
pub mod format;
pub mod frontend;
pub mod lint;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;
pub use frontend::resolver;
pub use frontend::symbols;

pub use brace_syntax::{SyntaxFailure, parse_source, parse_source_with_comments};
pub use codegen::{UnsupportedNodeError, generate};
pub use format::{FormatConfig, check_formatted, format_diff, format_source, format_source_with_config};
pub use frontend::resolver::{Resolution, resolve};
pub use lint::{LintConfig, LintDiagnostic, LintRule, lint};
