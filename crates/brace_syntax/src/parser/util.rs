/// Miscellaneous parser utilities.
///
/// This chunk contains small shared parsing helpers: identifier parsing and the one
/// comma-separated list rule used by parameters, arguments, arrays and objects.
impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    fn identifier_spanned(&mut self) -> Result<Spanned<Ident>, SyntaxError> {
        if matches!(self.peek().kind, TokenKind::Ident) {
            let token = self.advance();
            Ok(Spanned::new(token.lexeme, token.span))
        } else {
            Err(self.error(Expected::Token(TokenKind::Ident)))
        }
    }

    /// Parse `item ("," item)* ","?` up to and including `close`.
    ///
    /// The opening delimiter must already be consumed. Returns the items and whether the list
    /// ended with a trailing comma.
    fn delimited<T, F>(&mut self, close: PunctuationId, mut item: F) -> Result<(Vec<T>, bool), SyntaxError>
    where
        F: FnMut(&mut Self) -> Result<T, SyntaxError>,
    {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        while !self.check_punct(close) {
            items.push(item(self)?);
            trailing_comma = self.match_punct(PunctuationId::Comma);
            if !trailing_comma {
                break;
            }
        }
        self.expect_punct(close)?;
        Ok((items, trailing_comma))
    }
}
