/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single "god file".
/// - Recursion depth follows input nesting. The binary-operator climb lives entirely in
///   `Parser::binary_expr`.

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and stops at the first error.
/// - `Comment` tokens are only produced by the comment-keeping lexer mode. They become
///   statements in statement position and are skipped everywhere else.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// End offset of the most recently consumed token.
    prev_end: usize,
    /// Stand-in returned when the stream is missing its trailing `Eof`.
    eof: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `brace_syntax::lexer`.
    pub fn new(tokens: &'a [Token]) -> Self {
        let end = tokens.last().map_or(0, |t| t.span.end);
        Self {
            tokens,
            pos: 0,
            prev_end: 0,
            eof: Token::new(TokenKind::Eof, "", Span::new(end, end)),
        }
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// ## Errors
    /// Returns the first [`SyntaxError`] encountered.
    pub fn parse(mut self) -> Result<Program, SyntaxError> {
        let mut body = Vec::new();
        while !matches!(self.peek_raw().kind, TokenKind::Eof) {
            body.push(self.statement()?);
        }
        Ok(Program { body })
    }
}
