//! Token types for the brace lexer.
//!
//! Keyword, operator and punctuation tokens carry registry IDs from [`crate::lang`], so the
//! parser never compares spellings. Every token also keeps its exact source text in `lexeme`.

use std::fmt;

use crate::ast::Span;
use crate::lang::keywords::{self, KeywordId};
use crate::lang::operators::{self, OperatorId};
use crate::lang::punctuation::{self, PunctuationId};

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    Ident,
    /// `\d+(\.\d+)?`
    Number,
    /// Single- or double-quoted; `lexeme` keeps the quotes and escapes.
    String,
    /// Only produced when comment retention is switched on.
    Comment,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(id) => write!(f, "'{}'", keywords::as_str(*id)),
            TokenKind::Operator(id) => write!(f, "'{}'", operators::as_str(*id)),
            TokenKind::Punctuation(id) => write!(f, "'{}'", punctuation::as_str(*id)),
            TokenKind::Ident => write!(f, "identifier"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::String => write!(f, "string"),
            TokenKind::Comment => write!(f, "comment"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with its kind, source text and span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Byte offset of the first character of this token.
    pub fn offset(&self) -> usize {
        self.span.start
    }
}
