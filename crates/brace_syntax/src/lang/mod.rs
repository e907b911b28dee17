//! Canonical language vocabulary: keywords, operators and punctuation.
//!
//! The lexer consults these registries instead of hard-coding spellings, and the parser
//! matches on the stable IDs they define.
//!
//! ## Notes
//! - Matching is **first-match-wins** over [`SCAN_ORDER`], so a spelling must come before any
//!   shorter spelling that is its prefix (`>=` before `>`, `=>` before `=`).
//! - Keywords are only recognized as whole words; see [`keywords::from_str`].
//!
//! ## Examples
//! ```rust
//! use brace_syntax::lang::{self, Symbol};
//! use brace_syntax::lang::operators::OperatorId;
//!
//! assert_eq!(lang::match_symbol(">= 1"), Some((">=", Symbol::Operator(OperatorId::GtEq))));
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;

use operators::OperatorId;
use punctuation::PunctuationId;

/// A non-word token spelling: either an operator or a piece of punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Operator(OperatorId),
    Punctuation(PunctuationId),
}

/// Ordered symbol patterns tried by the lexer.
pub const SCAN_ORDER: &[(&str, Symbol)] = &[
    // Two-character spellings
    ("=>", Symbol::Punctuation(PunctuationId::FatArrow)),
    ("==", Symbol::Operator(OperatorId::EqEq)),
    ("!=", Symbol::Operator(OperatorId::NotEq)),
    ("<=", Symbol::Operator(OperatorId::LtEq)),
    (">=", Symbol::Operator(OperatorId::GtEq)),
    ("&&", Symbol::Operator(OperatorId::AndAnd)),
    ("||", Symbol::Operator(OperatorId::OrOr)),
    ("++", Symbol::Operator(OperatorId::PlusPlus)),
    ("--", Symbol::Operator(OperatorId::MinusMinus)),
    ("+=", Symbol::Operator(OperatorId::PlusEq)),
    ("-=", Symbol::Operator(OperatorId::MinusEq)),
    ("*=", Symbol::Operator(OperatorId::StarEq)),
    ("/=", Symbol::Operator(OperatorId::SlashEq)),
    // Single-character spellings
    ("+", Symbol::Operator(OperatorId::Plus)),
    ("-", Symbol::Operator(OperatorId::Minus)),
    ("*", Symbol::Operator(OperatorId::Star)),
    ("/", Symbol::Operator(OperatorId::Slash)),
    ("=", Symbol::Operator(OperatorId::Eq)),
    ("<", Symbol::Operator(OperatorId::Lt)),
    (">", Symbol::Operator(OperatorId::Gt)),
    ("(", Symbol::Punctuation(PunctuationId::LParen)),
    (")", Symbol::Punctuation(PunctuationId::RParen)),
    ("{", Symbol::Punctuation(PunctuationId::LBrace)),
    ("}", Symbol::Punctuation(PunctuationId::RBrace)),
    ("[", Symbol::Punctuation(PunctuationId::LBracket)),
    ("]", Symbol::Punctuation(PunctuationId::RBracket)),
    (",", Symbol::Punctuation(PunctuationId::Comma)),
    (";", Symbol::Punctuation(PunctuationId::Semicolon)),
    (":", Symbol::Punctuation(PunctuationId::Colon)),
    (".", Symbol::Punctuation(PunctuationId::Dot)),
];

/// Find the first symbol pattern that prefixes `rest`.
///
/// ## Returns
/// - The matched spelling and its symbol, or `None` if no pattern applies.
pub fn match_symbol(rest: &str) -> Option<(&'static str, Symbol)> {
    SCAN_ORDER
        .iter()
        .find(|(spelling, _)| rest.starts_with(spelling))
        .copied()
}
