//! Errors raised by the syntax frontend.
//!
//! Scanning and parsing are fail-fast: the first violation becomes the only error. Both error
//! types carry a byte offset into the source and implement [`miette::Diagnostic`], so a caller can
//! render them against the original text with a labelled span.

use std::fmt;

use miette::{Diagnostic, LabeledSpan};
use thiserror::Error;

use crate::lexer::TokenKind;

// ============================================================================
// Lexical errors
// ============================================================================

/// What went wrong at a [`LexicalError`] position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorKind {
    UnexpectedChar(char),
    UnterminatedString,
    UnterminatedComment,
}

impl fmt::Display for LexicalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexicalErrorKind::UnexpectedChar(c) => write!(f, "unexpected character {:?}", c),
            LexicalErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexicalErrorKind::UnterminatedComment => write!(f, "unterminated block comment"),
        }
    }
}

/// No token pattern matches at `offset`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct LexicalError {
    pub offset: usize,
    pub kind: LexicalErrorKind,
}

impl LexicalError {
    pub fn new(offset: usize, kind: LexicalErrorKind) -> Self {
        Self { offset, kind }
    }
}

impl Diagnostic for LexicalError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("brace::lex"))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::at_offset(self.offset, "no token starts here");
        Some(Box::new(std::iter::once(label)))
    }
}

// ============================================================================
// Syntax errors
// ============================================================================

/// What the parser was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// One specific token kind.
    Token(TokenKind),
    /// Anything that can start a statement.
    Statement,
    /// Anything that can start an expression.
    Expression,
    /// An identifier or member expression on the left of an assignment or update.
    AssignmentTarget,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::Statement => write!(f, "statement"),
            Expected::Expression => write!(f, "expression"),
            Expected::AssignmentTarget => write!(f, "assignment target"),
        }
    }
}

/// The token at `offset` does not fit the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {actual} at offset {offset}")]
pub struct SyntaxError {
    pub expected: Expected,
    pub actual: TokenKind,
    pub offset: usize,
}

impl SyntaxError {
    pub fn new(expected: Expected, actual: TokenKind, offset: usize) -> Self {
        Self {
            expected,
            actual,
            offset,
        }
    }
}

impl Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("brace::syntax"))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::at_offset(self.offset, format!("expected {}", self.expected));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Either stage of turning text into a tree failed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SyntaxFailure {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),
}

impl SyntaxFailure {
    pub fn offset(&self) -> usize {
        match self {
            SyntaxFailure::Lexical(e) => e.offset,
            SyntaxFailure::Syntax(e) => e.offset,
        }
    }
}

// ============================================================================
// Source positions
// ============================================================================

/// Map a byte offset to a 1-based `(line, column)` pair.
///
/// Columns count characters, not bytes. Offsets past the end clamp to the last position.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut col = 1;
    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
