//! Diagnostics and error reporting for brace
//!
//! The error types live in `brace_syntax::diagnostics` and are re-exported here. This module
//! adds the two ways the tools print them: a full miette report with the offending source line,
//! and a one-line `file:line:col: message` form used for lint findings.

pub use brace_syntax::diagnostics::{
    Expected, LexicalError, LexicalErrorKind, SyntaxError, SyntaxFailure, line_col,
};

use miette::{Diagnostic, NamedSource, Report};

/// Render `error` against `source` with a labelled span.
pub fn render<E>(file_name: &str, source: &str, error: E) -> String
where
    E: Diagnostic + Send + Sync + 'static,
{
    let report = Report::new(error).with_source_code(NamedSource::new(file_name, source.to_string()));
    format!("{:?}", report)
}

/// `file:line:col: message`, with 1-based line and column.
pub fn format_location(file_name: &str, source: &str, offset: usize, message: &str) -> String {
    let (line, col) = line_col(source, offset);
    format!("{}:{}:{}: {}", file_name, line, col, message)
}
