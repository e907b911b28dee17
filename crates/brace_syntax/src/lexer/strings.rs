//! String literal scanning and decoding.

use super::Lexer;
use crate::diagnostics::{LexicalError, LexicalErrorKind};

impl<'a> Lexer<'a> {
    /// Scan a quoted string whose opening quote is at `start`.
    ///
    /// A backslash escapes the next character, including the quote and a newline.
    pub(super) fn scan_string(&mut self, start: usize, quote: char) -> Result<(), LexicalError> {
        self.advance(); // opening quote
        loop {
            match self.advance() {
                Some('\\') => {
                    if self.advance().is_none() {
                        break;
                    }
                }
                Some(c) if c == quote => {
                    self.add_token(super::TokenKind::String, start);
                    return Ok(());
                }
                Some(_) => {}
                None => break,
            }
        }
        Err(LexicalError::new(start, LexicalErrorKind::UnterminatedString))
    }
}

/// Decode the value of a string token from its lexeme (quotes included).
///
/// Recognized escapes are `\n`, `\t`, `\r`, `\0`, `\\` and the quote characters; any other
/// escaped character stands for itself.
pub fn decode_string(lexeme: &str) -> String {
    let inner = lexeme
        .get(1..lexeme.len().saturating_sub(1))
        .unwrap_or_default();
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Render `value` as a double-quoted literal that [`decode_string`] reads back unchanged.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_and_escaped() {
        assert_eq!(decode_string("\"hello\""), "hello");
        assert_eq!(decode_string("'it\\'s'"), "it's");
        assert_eq!(decode_string("\"a\\nb\""), "a\nb");
        assert_eq!(decode_string("\"\\q\""), "q");
    }

    #[test]
    fn test_quote_then_decode() {
        for value in ["", "plain", "with \"quotes\"", "back\\slash", "line\nbreak", "tab\there"] {
            assert_eq!(decode_string(&quote_string(value)), value);
        }
    }
}
