/// Token-stream helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`), skipping comment trivia
/// - Matching / expecting keywords, operators, and punctuation
/// - Building [`SyntaxError`]s at the current token
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return the token at the cursor, including comment tokens.
    fn peek_raw(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Index of the first non-trivia token at or after the cursor.
    fn significant_pos(&self) -> usize {
        let mut pos = self.pos;
        while self.tokens.get(pos).is_some_and(|t| t.kind.is_trivia()) {
            pos += 1;
        }
        pos
    }

    /// Return the current significant token without consuming it.
    fn peek(&self) -> &Token {
        self.tokens.get(self.significant_pos()).unwrap_or(&self.eof)
    }

    /// Consume the current significant token (and any trivia before it) and return it.
    ///
    /// At end of input the `Eof` token is returned and the cursor does not move.
    fn advance(&mut self) -> Token {
        self.pos = self.significant_pos();
        let token = self.peek_raw().clone();
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
            self.prev_end = token.span.end;
        }
        token
    }

    /// Drop comment tokens at the cursor.
    fn skip_trivia(&mut self) {
        self.pos = self.significant_pos();
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId) -> Result<Token, SyntaxError> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(self.error(Expected::Token(TokenKind::Keyword(id))))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId) -> Result<Token, SyntaxError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.error(Expected::Token(TokenKind::Punctuation(id))))
        }
    }

    /// Build an error describing the current significant token.
    fn error(&self, expected: Expected) -> SyntaxError {
        let found = self.peek();
        SyntaxError::new(expected, found.kind, found.offset())
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    /// Check if the current token can start an expression.
    ///
    /// `{` counts (object literal); statement parsing checks for a block first.
    fn is_at_expr_start(&self) -> bool {
        let kind = self.peek().kind;
        matches!(kind, TokenKind::Ident | TokenKind::Number | TokenKind::String)
            || matches!(
                kind.keyword_id(),
                Some(KeywordId::True | KeywordId::False | KeywordId::Null | KeywordId::Undefined)
            )
            || matches!(
                kind.punctuation_id(),
                Some(PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace)
            )
            || matches!(kind.operator_id(), Some(OperatorId::PlusPlus | OperatorId::MinusMinus))
    }
}
