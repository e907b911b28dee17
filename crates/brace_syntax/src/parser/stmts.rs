/// Statement parsing methods.
///
/// This chunk parses statement forms (declarations, `return`, `if`, `for`, blocks, retained
/// comments and expression statements).
///
/// ## Notes
/// - Trailing semicolons are optional everywhere except between the three clauses of `for`.
/// - A `{` in statement position is always a block, never an object literal.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self) -> Result<Spanned<Statement>, SyntaxError> {
        if matches!(self.peek_raw().kind, TokenKind::Comment) {
            let token = self.peek_raw().clone();
            self.pos += 1;
            self.prev_end = token.span.end;
            return Ok(Spanned::new(Statement::Comment(token.lexeme), token.span));
        }

        let start = self.current_span().start;

        let stmt = if let Some(kind) = self.decl_kind() {
            let decl = self.var_decl(kind)?;
            self.match_punct(PunctuationId::Semicolon);
            Statement::VarDecl(decl)
        } else if self.check_keyword(KeywordId::Function) {
            Statement::Function(self.function_decl()?)
        } else if self.check_keyword(KeywordId::Return) {
            self.return_stmt()?
        } else if self.check_keyword(KeywordId::If) {
            Statement::If(self.if_stmt()?)
        } else if self.check_keyword(KeywordId::For) {
            Statement::For(self.for_stmt()?)
        } else if self.check_punct(PunctuationId::LBrace) {
            Statement::Block(self.block()?)
        } else if self.is_at_expr_start() {
            let expr = self.expression()?;
            self.match_punct(PunctuationId::Semicolon);
            Statement::Expr(expr)
        } else {
            return Err(self.error(Expected::Statement));
        };

        Ok(Spanned::new(stmt, self.span_from(start)))
    }

    /// A statement nested under `if`, `else` or `for`. Comments here are dropped so they
    /// cannot take the place of the real body.
    fn nested_statement(&mut self) -> Result<Box<Spanned<Statement>>, SyntaxError> {
        self.skip_trivia();
        Ok(Box::new(self.statement()?))
    }

    fn decl_kind(&self) -> Option<DeclKind> {
        match self.peek().kind.keyword_id()? {
            KeywordId::Const => Some(DeclKind::Const),
            KeywordId::Let => Some(DeclKind::Let),
            KeywordId::Var => Some(DeclKind::Var),
            _ => None,
        }
    }

    /// `const|let|var name (= init)?` without the trailing semicolon.
    fn var_decl(&mut self, kind: DeclKind) -> Result<VarDecl, SyntaxError> {
        self.advance(); // const / let / var
        let name = self.identifier_spanned()?;
        let init = if self.check_op(OperatorId::Eq) {
            self.advance();
            Some(self.expression()?)
        } else {
            None
        };
        Ok(VarDecl { kind, name, init })
    }

    fn function_decl(&mut self) -> Result<FunctionDecl, SyntaxError> {
        self.expect_keyword(KeywordId::Function)?;
        let name = self.identifier_spanned()?;
        self.expect_punct(PunctuationId::LParen)?;
        let (params, _) = self.delimited(PunctuationId::RParen, |p| p.identifier_spanned())?;
        let body = self.block()?;
        Ok(FunctionDecl { name, params, body })
    }

    fn return_stmt(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(KeywordId::Return)?;
        let argument = if self.is_at_expr_start() {
            Some(self.expression()?)
        } else {
            None
        };
        self.match_punct(PunctuationId::Semicolon);
        Ok(Statement::Return(argument))
    }

    fn if_stmt(&mut self) -> Result<IfStmt, SyntaxError> {
        self.expect_keyword(KeywordId::If)?;
        self.expect_punct(PunctuationId::LParen)?;
        let test = self.expression()?;
        self.expect_punct(PunctuationId::RParen)?;
        let consequent = self.nested_statement()?;

        let alternate = if self.match_keyword(KeywordId::Else) {
            Some(self.nested_statement()?)
        } else {
            None
        };

        Ok(IfStmt {
            test,
            consequent,
            alternate,
        })
    }

    fn for_stmt(&mut self) -> Result<ForStmt, SyntaxError> {
        self.expect_keyword(KeywordId::For)?;
        self.expect_punct(PunctuationId::LParen)?;

        let init = if self.check_punct(PunctuationId::Semicolon) {
            None
        } else if let Some(kind) = self.decl_kind() {
            let start = self.current_span().start;
            let decl = self.var_decl(kind)?;
            Some(ForInit::VarDecl(Spanned::new(decl, self.span_from(start))))
        } else {
            Some(ForInit::Expr(self.expression()?))
        };
        self.expect_punct(PunctuationId::Semicolon)?;

        let test = if self.check_punct(PunctuationId::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_punct(PunctuationId::Semicolon)?;

        let update = if self.check_punct(PunctuationId::RParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_punct(PunctuationId::RParen)?;

        let body = self.nested_statement()?;
        Ok(ForStmt {
            init,
            test,
            update,
            body,
        })
    }

    /// `{ statement* }`
    fn block(&mut self) -> Result<Block, SyntaxError> {
        self.expect_punct(PunctuationId::LBrace)?;
        let mut body = Vec::new();
        while !self.at_block_end() {
            body.push(self.statement()?);
        }
        self.expect_punct(PunctuationId::RBrace)?;
        Ok(Block { body })
    }

    /// Arrow bodies hold only `return` statements and expression statements.
    fn arrow_body(&mut self) -> Result<Block, SyntaxError> {
        self.expect_punct(PunctuationId::LBrace)?;
        let mut body = Vec::new();
        while !self.at_block_end() {
            let stmt = if matches!(self.peek_raw().kind, TokenKind::Comment) || self.check_keyword(KeywordId::Return) {
                self.statement()?
            } else {
                let start = self.current_span().start;
                let expr = self.expression()?;
                self.match_punct(PunctuationId::Semicolon);
                Spanned::new(Statement::Expr(expr), self.span_from(start))
            };
            body.push(stmt);
        }
        self.expect_punct(PunctuationId::RBrace)?;
        Ok(Block { body })
    }

    /// `}` or end of input, looking at the raw token so a comment before `}` is kept.
    fn at_block_end(&self) -> bool {
        let kind = self.peek_raw().kind;
        kind.is_punctuation(PunctuationId::RBrace) || matches!(kind, TokenKind::Eof)
    }
}
