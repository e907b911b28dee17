/// Expression parsing methods.
///
/// This chunk implements expression parsing with precedence climbing:
///
/// 1. assignment (right-associative, `= += -= *= /=`)
/// 2. binary operators via [`operators::precedence`] (`||` < `&&` < comparisons < `+ -` < `* /`)
/// 3. prefix `++` / `--`
/// 4. postfix chains: calls, `.name`, `[index]`, `++` / `--`
/// 5. primaries, including the parenthesized list that is either a grouping or arrow parameters
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let first = self.peek().kind;
        let target = self.binary_expr(0)?;

        let Some(op) = self.peek().operator_id().and_then(AssignOp::from_operator) else {
            return Ok(target);
        };
        Self::check_target(&target, first)?;
        self.advance();

        let value = self.assignment()?;
        let span = target.span.merge(value.span);
        Ok(Spanned::new(Expr::Assign(Box::new(target), op, Box::new(value)), span))
    }

    /// Precedence climbing over binary operators. All levels are left-associative.
    fn binary_expr(&mut self, min_prec: u8) -> Result<Spanned<Expr>, SyntaxError> {
        let mut left = self.unary()?;

        loop {
            let Some(id) = self.peek().operator_id() else {
                break;
            };
            let (Some(prec), Some(op)) = (operators::precedence(id), BinaryOp::from_operator(id)) else {
                break;
            };
            if prec < min_prec {
                break;
            }
            self.advance();

            let right = self.binary_expr(prec + 1)?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span);
        }

        Ok(left)
    }

    fn unary(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        if let Some(op) = self.peek().operator_id().and_then(UpdateOp::from_operator) {
            let start = self.advance().span.start;
            let first = self.peek().kind;
            let argument = self.unary()?;
            Self::check_target(&argument, first)?;
            let span = Span::new(start, argument.span.end);
            return Ok(Spanned::new(
                Expr::Update {
                    op,
                    prefix: true,
                    argument: Box::new(argument),
                },
                span,
            ));
        }
        self.postfix()
    }

    fn postfix(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let first = self.peek().kind;
        let mut expr = self.primary()?;
        let start = expr.span.start;

        loop {
            if self.match_punct(PunctuationId::LParen) {
                let (args, _) = self.delimited(PunctuationId::RParen, |p| p.expression())?;
                expr = Spanned::new(Expr::Call(Box::new(expr), args), self.span_from(start));
            } else if self.match_punct(PunctuationId::Dot) {
                let property = self.identifier_spanned()?;
                expr = Spanned::new(
                    Expr::Member {
                        object: Box::new(expr),
                        property: MemberProperty::Named(property),
                    },
                    self.span_from(start),
                );
            } else if self.match_punct(PunctuationId::LBracket) {
                let index = self.expression()?;
                self.expect_punct(PunctuationId::RBracket)?;
                expr = Spanned::new(
                    Expr::Member {
                        object: Box::new(expr),
                        property: MemberProperty::Computed(Box::new(index)),
                    },
                    self.span_from(start),
                );
            } else if let Some(op) = self.peek().operator_id().and_then(UpdateOp::from_operator) {
                Self::check_target(&expr, first)?;
                self.advance();
                expr = Spanned::new(
                    Expr::Update {
                        op,
                        prefix: false,
                        argument: Box::new(expr),
                    },
                    self.span_from(start),
                );
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn primary(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let token = self.peek().clone();
        let span = token.span;

        let literal = match token.kind {
            TokenKind::Number => match token.lexeme.parse::<f64>() {
                Ok(value) => Some(Literal::Number(value)),
                Err(_) => return Err(self.error(Expected::Expression)),
            },
            TokenKind::String => Some(Literal::String(decode_string(&token.lexeme))),
            TokenKind::Keyword(KeywordId::True) => Some(Literal::Bool(true)),
            TokenKind::Keyword(KeywordId::False) => Some(Literal::Bool(false)),
            TokenKind::Keyword(KeywordId::Null) => Some(Literal::Null),
            TokenKind::Keyword(KeywordId::Undefined) => Some(Literal::Undefined),
            _ => None,
        };
        if let Some(literal) = literal {
            self.advance();
            return Ok(Spanned::new(Expr::Literal(literal), span));
        }

        match token.kind {
            TokenKind::Ident => {
                self.advance();
                Ok(Spanned::new(Expr::Ident(token.lexeme), span))
            }
            TokenKind::Punctuation(PunctuationId::LParen) => self.paren_or_arrow(),
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                self.advance();
                let (elements, _) = self.delimited(PunctuationId::RBracket, |p| p.expression())?;
                Ok(Spanned::new(Expr::Array(elements), self.span_from(span.start)))
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => {
                self.advance();
                let (properties, _) = self.delimited(PunctuationId::RBrace, |p| p.property())?;
                Ok(Spanned::new(Expr::Object(properties), self.span_from(span.start)))
            }
            _ => Err(self.error(Expected::Expression)),
        }
    }

    fn property(&mut self) -> Result<Property, SyntaxError> {
        let key = self.identifier_spanned()?;
        self.expect_punct(PunctuationId::Colon)?;
        let value = self.expression()?;
        Ok(Property { key, value })
    }

    /// `( list )` followed by `=> { ... }` is an arrow function; otherwise the list must
    /// hold exactly one expression, which becomes [`Expr::Paren`].
    fn paren_or_arrow(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let start = self.expect_punct(PunctuationId::LParen)?.span.start;
        let (elements, trailing_comma) = self.delimited(PunctuationId::RParen, |p| {
            let first = p.peek().kind;
            Ok((first, p.expression()?))
        })?;

        if self.match_punct(PunctuationId::FatArrow) {
            let mut params = Vec::with_capacity(elements.len());
            for (first, element) in elements {
                match element.node {
                    Expr::Ident(name) => params.push(Spanned::new(name, element.span)),
                    _ => {
                        return Err(SyntaxError::new(
                            Expected::Token(TokenKind::Ident),
                            first,
                            element.span.start,
                        ));
                    }
                }
            }
            let body = self.arrow_body()?;
            return Ok(Spanned::new(
                Expr::Arrow(ArrowFunction { params, body }),
                self.span_from(start),
            ));
        }

        let mut elements = elements;
        match (elements.pop(), elements.is_empty(), trailing_comma) {
            (Some((_, inner)), true, false) => Ok(Spanned::new(Expr::Paren(Box::new(inner)), self.span_from(start))),
            _ => Err(self.error(Expected::Token(TokenKind::Punctuation(PunctuationId::FatArrow)))),
        }
    }

    /// Assignment and update targets must be identifiers or member expressions.
    fn check_target(target: &Spanned<Expr>, first: TokenKind) -> Result<(), SyntaxError> {
        match target.node {
            Expr::Ident(_) | Expr::Member { .. } => Ok(()),
            _ => Err(SyntaxError::new(Expected::AssignmentTarget, first, target.span.start)),
        }
    }
}
