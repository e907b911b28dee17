//! Punctuation vocabulary: delimiters, separators and access markers.

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Separators
    Comma,
    Semicolon,
    Colon,

    // Access
    Dot,

    // Arrow-function marker
    FatArrow,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub spelling: &'static str,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    PunctuationInfo { id: PunctuationId::Comma, spelling: "," },
    PunctuationInfo { id: PunctuationId::Semicolon, spelling: ";" },
    PunctuationInfo { id: PunctuationId::Colon, spelling: ":" },
    PunctuationInfo { id: PunctuationId::Dot, spelling: "." },
    PunctuationInfo { id: PunctuationId::FatArrow, spelling: "=>" },
    PunctuationInfo { id: PunctuationId::LParen, spelling: "(" },
    PunctuationInfo { id: PunctuationId::RParen, spelling: ")" },
    PunctuationInfo { id: PunctuationId::LBrace, spelling: "{" },
    PunctuationInfo { id: PunctuationId::RBrace, spelling: "}" },
    PunctuationInfo { id: PunctuationId::LBracket, spelling: "[" },
    PunctuationInfo { id: PunctuationId::RBracket, spelling: "]" },
];

/// Canonical spelling.
pub fn as_str(id: PunctuationId) -> &'static str {
    match id {
        PunctuationId::Comma => ",",
        PunctuationId::Semicolon => ";",
        PunctuationId::Colon => ":",
        PunctuationId::Dot => ".",
        PunctuationId::FatArrow => "=>",
        PunctuationId::LParen => "(",
        PunctuationId::RParen => ")",
        PunctuationId::LBrace => "{",
        PunctuationId::RBrace => "}",
        PunctuationId::LBracket => "[",
        PunctuationId::RBracket => "]",
    }
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.spelling == s).map(|p| p.id)
}
