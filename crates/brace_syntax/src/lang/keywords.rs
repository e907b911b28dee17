//! Reserved words.
//!
//! ## Examples
//! ```rust
//! use brace_syntax::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("let"), Some(KeywordId::Let));
//! assert_eq!(keywords::from_str("letter"), None);
//! assert_eq!(keywords::as_str(KeywordId::Function), "function");
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Declarations
    Const,
    Let,
    Var,
    Function,

    // Control flow
    Return,
    If,
    Else,
    For,

    // Literal keywords
    True,
    False,
    Null,
    Undefined,
}

/// Broad grouping for keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Declaration,
    ControlFlow,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(KeywordId::Const, "const", KeywordCategory::Declaration),
    info(KeywordId::Let, "let", KeywordCategory::Declaration),
    info(KeywordId::Var, "var", KeywordCategory::Declaration),
    info(KeywordId::Function, "function", KeywordCategory::Declaration),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow),
    info(KeywordId::If, "if", KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow),
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::Null, "null", KeywordCategory::Literal),
    info(KeywordId::Undefined, "undefined", KeywordCategory::Literal),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    match id {
        KeywordId::Const => "const",
        KeywordId::Let => "let",
        KeywordId::Var => "var",
        KeywordId::Function => "function",
        KeywordId::Return => "return",
        KeywordId::If => "if",
        KeywordId::Else => "else",
        KeywordId::For => "for",
        KeywordId::True => "true",
        KeywordId::False => "false",
        KeywordId::Null => "null",
        KeywordId::Undefined => "undefined",
    }
}

/// Lookup by spelling.
///
/// ## Notes
/// - `s` must be a complete identifier-shaped word: the lexer scans the whole word first, so
///   `letter` is an identifier and never `let` followed by `ter`.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { id, canonical, category }
}
