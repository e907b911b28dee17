//! Lexer for the brace language
//!
//! Handles tokenization including:
//! - Keywords (`const`, `let`, `var`, `function`, `return`, `if`, `else`, `for`, literal words)
//! - Identifiers, numbers and single/double-quoted strings
//! - Operators and punctuation from the ordered [`crate::lang::SCAN_ORDER`] table
//! - Line (`//`) and block (`/* */`) comments, discarded unless retention is switched on
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String scanning and escape decoding

mod strings;
pub mod tokens;

pub use strings::{decode_string, quote_string};
pub use tokens::{Token, TokenKind};

use crate::ast::Span;
use crate::diagnostics::{LexicalError, LexicalErrorKind};
use crate::lang::{self, Symbol, keywords};

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer for brace source code.
///
/// Converts source text into a stream of tokens. The first position that no pattern matches
/// stops the scan with a [`LexicalError`].
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    keep_comments: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            keep_comments: false,
            tokens: Vec::new(),
        }
    }

    /// Emit comments as [`TokenKind::Comment`] tokens instead of discarding them.
    pub fn keep_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }

    /// Tokenize the entire source code.
    ///
    /// The token stream always ends with an `Eof` token whose offset is the source length.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexicalError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            "",
            Span::new(self.current_pos, self.current_pos),
        ));

        Ok(self.tokens)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next(); // skip current
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        let lexeme = &self.source[start..self.current_pos];
        self.tokens
            .push(Token::new(kind, lexeme, Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Result<(), LexicalError> {
        let start = self.current_pos;
        let Some(c) = self.peek() else {
            return Ok(());
        };

        match c {
            _ if c.is_whitespace() => {
                self.advance();
            }

            // Comments are tried before the `/` operator.
            '/' if self.peek_next() == Some('/') => self.scan_line_comment(start),
            '/' if self.peek_next() == Some('*') => self.scan_block_comment(start)?,

            '"' | '\'' => self.scan_string(start, c)?,

            '0'..='9' => self.scan_number(start),

            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => self.scan_symbol(start, c)?,
        }
        Ok(())
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn scan_line_comment(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        self.finish_comment(start);
    }

    fn scan_block_comment(&mut self, start: usize) -> Result<(), LexicalError> {
        self.advance(); // '/'
        self.advance(); // '*'
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    self.finish_comment(start);
                    return Ok(());
                }
                Some(_) => {}
                None => return Err(LexicalError::new(start, LexicalErrorKind::UnterminatedComment)),
            }
        }
    }

    fn finish_comment(&mut self, start: usize) {
        if self.keep_comments {
            self.add_token(TokenKind::Comment, start);
        }
    }

    // ========================================================================
    // Numbers, identifiers and symbols
    // ========================================================================

    /// Scan `\d+(\.\d+)?`. A `.` not followed by a digit is left for the next token.
    fn scan_number(&mut self, start: usize) {
        self.skip_digits();
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.skip_digits();
        }
        self.add_token(TokenKind::Number, start);
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        // Keywords only match whole words, so `letter` stays an identifier.
        if let Some(id) = keywords::from_str(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident, start);
        }
    }

    fn scan_symbol(&mut self, start: usize, c: char) -> Result<(), LexicalError> {
        let Some((spelling, symbol)) = lang::match_symbol(&self.source[start..]) else {
            return Err(LexicalError::new(start, LexicalErrorKind::UnexpectedChar(c)));
        };
        for _ in spelling.chars() {
            self.advance();
        }
        let kind = match symbol {
            Symbol::Operator(id) => TokenKind::Operator(id),
            Symbol::Punctuation(id) => TokenKind::Punctuation(id),
        };
        self.add_token(kind, start);
        Ok(())
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string, discarding comments.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, LexicalError> {
    Lexer::new(source).tokenize()
}

/// Lex a source string, keeping comments as [`TokenKind::Comment`] tokens.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex_with_comments(source: &str) -> Result<Vec<Token>, LexicalError> {
    Lexer::new(source).keep_comments(true).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::keywords::KeywordId;
    use crate::lang::operators::OperatorId;
    use crate::lang::punctuation::PunctuationId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keyword_before_identifier() {
        assert_eq!(kinds("let"), vec![TokenKind::Keyword(KeywordId::Let), TokenKind::Eof]);
        assert_eq!(kinds("letter"), vec![TokenKind::Ident, TokenKind::Eof]);
        assert_eq!(kinds("functional"), vec![TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn test_multi_char_operators_win() {
        assert_eq!(kinds(">="), vec![TokenKind::Operator(OperatorId::GtEq), TokenKind::Eof]);
        assert_eq!(kinds("=="), vec![TokenKind::Operator(OperatorId::EqEq), TokenKind::Eof]);
        assert_eq!(kinds("=>"), vec![TokenKind::Punctuation(PunctuationId::FatArrow), TokenKind::Eof]);
        assert_eq!(kinds("i++"), vec![
            TokenKind::Ident,
            TokenKind::Operator(OperatorId::PlusPlus),
            TokenKind::Eof
        ]);
        assert_eq!(kinds("a && b || c"), vec![
            TokenKind::Ident,
            TokenKind::Operator(OperatorId::AndAnd),
            TokenKind::Ident,
            TokenKind::Operator(OperatorId::OrOr),
            TokenKind::Ident,
            TokenKind::Eof
        ]);
    }

    #[test]
    fn test_variable_declaration_tokens() {
        let tokens = lex("const x = 42;").unwrap();
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["const", "x", "=", "42", ";", ""]);
        assert_eq!(tokens[1].offset(), 6);
        assert_eq!(tokens[3].kind, TokenKind::Number);
        assert_eq!(tokens[5].offset(), 13);
    }

    #[test]
    fn test_numbers() {
        let tokens = lex("3.14 7 1.").unwrap();
        assert_eq!(tokens[0].lexeme, "3.14");
        assert_eq!(tokens[1].lexeme, "7");
        assert_eq!(tokens[2].lexeme, "1");
        assert_eq!(tokens[3].kind, TokenKind::Punctuation(PunctuationId::Dot));
    }

    #[test]
    fn test_strings_keep_quotes_in_lexeme() {
        let tokens = lex(r#"'a' "b\"c""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "'a'");
        assert_eq!(tokens[1].lexeme, r#""b\"c""#);
        assert_eq!(decode_string(&tokens[1].lexeme), "b\"c");
    }

    #[test]
    fn test_comments_are_discarded() {
        assert_eq!(kinds("// line\nx /* block */ y"), vec![
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Eof
        ]);
    }

    #[test]
    fn test_comments_can_be_kept() {
        let tokens = lex_with_comments("x // note\n/* a\nb */").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Comment);
        assert_eq!(tokens[1].lexeme, "// note");
        assert_eq!(tokens[2].kind, TokenKind::Comment);
        assert_eq!(tokens[2].lexeme, "/* a\nb */");
    }

    #[test]
    fn test_division_is_not_a_comment() {
        assert_eq!(kinds("a / b"), vec![
            TokenKind::Ident,
            TokenKind::Operator(OperatorId::Slash),
            TokenKind::Ident,
            TokenKind::Eof
        ]);
    }

    #[test]
    fn test_unexpected_character_reports_offset() {
        let err = lex("let x = #;").unwrap_err();
        assert_eq!(err.offset, 8);
        assert_eq!(err.kind, LexicalErrorKind::UnexpectedChar('#'));
    }

    #[test]
    fn test_unterminated_string() {
        let err = lex("x = \"abc").unwrap_err();
        assert_eq!(err.offset, 4);
        assert_eq!(err.kind, LexicalErrorKind::UnterminatedString);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = lex("x /* never closed").unwrap_err();
        assert_eq!(err.offset, 2);
        assert_eq!(err.kind, LexicalErrorKind::UnterminatedComment);
    }

    #[test]
    fn test_eof_offset_is_source_length() {
        let tokens = lex("  x  ").unwrap();
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert_eq!(tokens.last().unwrap().offset(), 5);
    }
}
