//! Shared syntax frontend for the brace language: vocabulary, lexer, parser, AST, diagnostics.
//!
//! This crate is dependency-light and intended for reuse by the resolver, linter, formatter,
//! code generator and CLI in the root `brace` crate.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does not do name resolution.
//! - Vocabulary identity (keywords/operators/punctuation) comes from the [`lang`] registries.
//! - Both passes are fail-fast: the first error is the only error, and no partial tree is
//!   returned.
//!
//! ## Examples
//! ```rust
//! use brace_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("const answer = 6 * 7;").unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert_eq!(program.body.len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod ast;
pub mod diagnostics;
pub mod lang;
pub mod lexer;
pub mod parser;
pub mod token_helpers;

pub use diagnostics::SyntaxFailure;

/// Lex and parse `source` in one step, discarding comments.
///
/// ## Errors
/// Returns the first [`diagnostics::LexicalError`] or [`diagnostics::SyntaxError`].
pub fn parse_source(source: &str) -> Result<ast::Program, SyntaxFailure> {
    let tokens = lexer::lex(source)?;
    Ok(parser::parse(&tokens)?)
}

/// Like [`parse_source`], but comments in statement position become
/// [`ast::Statement::Comment`] nodes.
pub fn parse_source_with_comments(source: &str) -> Result<ast::Program, SyntaxFailure> {
    let tokens = lexer::lex_with_comments(source)?;
    Ok(parser::parse(&tokens)?)
}
