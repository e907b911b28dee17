//! Parser for the brace language
//!
//! Converts a token stream into an AST by recursive descent, with precedence climbing for
//! binary operators. Parsing is fail-fast: the first mismatch is returned as a
//! [`SyntaxError`] and no partial tree is produced.
//!
//! ## Examples
//!
//! ```rust
//! use brace_syntax::ast::{Expr, Statement};
//! use brace_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("2 + 3 * 4;").unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert!(matches!(&program.body[0].node, Statement::Expr(e) if matches!(e.node, Expr::Binary(..))));
//! ```

use crate::ast::*;
use crate::diagnostics::{Expected, SyntaxError};
use crate::lang::keywords::KeywordId;
use crate::lang::operators::{self, OperatorId};
use crate::lang::punctuation::PunctuationId;
use crate::lexer::{Token, TokenKind, decode_string};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
