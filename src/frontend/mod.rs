//! brace frontend
//!
//! This module contains all frontend components:
//! - `lexer`: tokenization of source code
//! - `parser`: parsing tokens into AST
//! - `ast`: abstract syntax tree definitions
//! - `symbols`: symbol table and scope management
//! - `resolver`: name resolution over the AST
//! - `diagnostics`: error rendering and source positions

// Syntax components are provided by the shared brace_syntax crate.
pub use brace_syntax::{ast, lexer, parser};

pub mod diagnostics;
pub mod resolver;
pub mod symbols;
