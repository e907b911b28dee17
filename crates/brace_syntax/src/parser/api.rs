/// Parse a token stream into an AST [`Program`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `brace_syntax::lexer`, normally ending in `Eof`.
///
/// ## Errors
/// Returns the first [`SyntaxError`]; its offset is the offending token's offset, or the
/// end-of-input offset when the tokens ran out mid-construct.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Program, SyntaxError> {
    Parser::new(tokens).parse()
}
