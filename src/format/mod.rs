//! brace code formatter
//!
//! This module provides code formatting functionality for brace source files:
//! - 2-space indentation by default
//! - Double quotes for strings
//! - One statement per line, trailing semicolons everywhere
//! - Non-empty object and array literals broken one element per line
//!
//! Comments in statement position survive formatting; comments inside expressions are dropped.

mod config;
mod formatter;
mod writer;

pub use config::FormatConfig;
pub use formatter::Formatter;
pub(crate) use formatter::format_literal;

use brace_syntax::SyntaxFailure;

use crate::frontend::ast::Program;

/// Format a parsed program.
#[tracing::instrument(skip_all, fields(statements = program.body.len()))]
pub fn format(program: &Program, config: &FormatConfig) -> String {
    Formatter::new(config.clone()).format(program)
}

/// Format brace source code with default settings
pub fn format_source(source: &str) -> Result<String, SyntaxFailure> {
    format_source_with_config(source, &FormatConfig::default())
}

/// Format brace source code with custom configuration, keeping comments
pub fn format_source_with_config(source: &str, config: &FormatConfig) -> Result<String, SyntaxFailure> {
    let program = brace_syntax::parse_source_with_comments(source)?;
    Ok(format(&program, config))
}

/// Check if source code is already formatted
pub fn check_formatted(source: &str, config: &FormatConfig) -> Result<bool, SyntaxFailure> {
    let formatted = format_source_with_config(source, config)?;
    Ok(source == formatted)
}

/// Get the diff between original and formatted source, or `None` if nothing changes
pub fn format_diff(source: &str, config: &FormatConfig) -> Result<Option<String>, SyntaxFailure> {
    let formatted = format_source_with_config(source, config)?;

    if source == formatted {
        return Ok(None);
    }

    // Simple line-by-line diff
    let mut diff = String::new();
    let original_lines: Vec<&str> = source.lines().collect();
    let formatted_lines: Vec<&str> = formatted.lines().collect();

    let max_lines = original_lines.len().max(formatted_lines.len());

    for i in 0..max_lines {
        let orig = original_lines.get(i).copied();
        let fmt = formatted_lines.get(i).copied();

        if orig != fmt {
            if let Some(orig) = orig {
                diff.push_str(&std::format!("-{:4} | {}\n", i + 1, orig));
            }
            if let Some(fmt) = fmt {
                diff.push_str(&std::format!("+{:4} | {}\n", i + 1, fmt));
            }
        }
    }

    Ok(Some(diff))
}
