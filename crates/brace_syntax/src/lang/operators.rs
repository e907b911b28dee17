//! Operator vocabulary and binary-operator precedence.
//!
//! ## Notes
//! - Precedence follows the climbing table used by the parser: multiplicative `4`, additive `3`,
//!   relational and equality `2`, `&&` `1`, `||` `0`. Every binary operator is left-associative.
//! - Assignment and update operators carry no binary precedence.

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    AndAnd,
    OrOr,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,

    // Update
    PlusPlus,
    MinusMinus,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    /// Binding strength when used as a binary operator.
    pub precedence: Option<u8>,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    op(OperatorId::Plus, "+", Some(3)),
    op(OperatorId::Minus, "-", Some(3)),
    op(OperatorId::Star, "*", Some(4)),
    op(OperatorId::Slash, "/", Some(4)),
    op(OperatorId::EqEq, "==", Some(2)),
    op(OperatorId::NotEq, "!=", Some(2)),
    op(OperatorId::Lt, "<", Some(2)),
    op(OperatorId::LtEq, "<=", Some(2)),
    op(OperatorId::Gt, ">", Some(2)),
    op(OperatorId::GtEq, ">=", Some(2)),
    op(OperatorId::AndAnd, "&&", Some(1)),
    op(OperatorId::OrOr, "||", Some(0)),
    op(OperatorId::Eq, "=", None),
    op(OperatorId::PlusEq, "+=", None),
    op(OperatorId::MinusEq, "-=", None),
    op(OperatorId::StarEq, "*=", None),
    op(OperatorId::SlashEq, "/=", None),
    op(OperatorId::PlusPlus, "++", None),
    op(OperatorId::MinusMinus, "--", None),
];

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    match id {
        OperatorId::Plus => "+",
        OperatorId::Minus => "-",
        OperatorId::Star => "*",
        OperatorId::Slash => "/",
        OperatorId::EqEq => "==",
        OperatorId::NotEq => "!=",
        OperatorId::Lt => "<",
        OperatorId::LtEq => "<=",
        OperatorId::Gt => ">",
        OperatorId::GtEq => ">=",
        OperatorId::AndAnd => "&&",
        OperatorId::OrOr => "||",
        OperatorId::Eq => "=",
        OperatorId::PlusEq => "+=",
        OperatorId::MinusEq => "-=",
        OperatorId::StarEq => "*=",
        OperatorId::SlashEq => "/=",
        OperatorId::PlusPlus => "++",
        OperatorId::MinusMinus => "--",
    }
}

/// Binary precedence, or `None` if `id` is not a binary operator.
pub fn precedence(id: OperatorId) -> Option<u8> {
    OPERATORS.iter().find(|o| o.id == id).and_then(|o| o.precedence)
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

const fn op(id: OperatorId, spelling: &'static str, precedence: Option<u8>) -> OperatorInfo {
    OperatorInfo { id, spelling, precedence }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_table() {
        assert_eq!(precedence(OperatorId::Star), Some(4));
        assert_eq!(precedence(OperatorId::Minus), Some(3));
        assert_eq!(precedence(OperatorId::GtEq), Some(2));
        assert_eq!(precedence(OperatorId::NotEq), Some(2));
        assert_eq!(precedence(OperatorId::AndAnd), Some(1));
        assert_eq!(precedence(OperatorId::OrOr), Some(0));
        assert_eq!(precedence(OperatorId::Eq), None);
        assert_eq!(precedence(OperatorId::PlusPlus), None);
    }

    #[test]
    fn test_spellings_round_trip() {
        for o in OPERATORS {
            assert_eq!(as_str(o.id), o.spelling);
            assert_eq!(from_str(o.spelling), Some(o.id));
        }
    }
}
