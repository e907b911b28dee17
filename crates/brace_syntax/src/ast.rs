//! Abstract Syntax Tree definitions for brace
//!
//! This module defines all AST node types. Every node kind is a distinct variant, so each
//! consumer (resolver, lint, formatter, generator) matches exhaustively. Nodes own their
//! children; there are no parent links.

use std::fmt;

use crate::lang::operators::OperatorId;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Identifier spelling
pub type Ident = String;

/// A program is a sequence of statements
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Spanned<Statement>>,
}

// ============================================================================
// Node kinds
// ============================================================================

/// Tag naming every node kind, used in diagnostics and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    VariableDeclaration,
    FunctionDeclaration,
    BlockStatement,
    ReturnStatement,
    IfStatement,
    ForStatement,
    ExpressionStatement,
    Comment,
    ArrowFunctionExpression,
    CallExpression,
    MemberExpression,
    BinaryExpression,
    AssignmentExpression,
    UpdateExpression,
    ObjectExpression,
    ArrayExpression,
    ParenthesizedExpression,
    Literal,
    Identifier,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `const x = value;`, `let x;`, `var x = value`
    VarDecl(VarDecl),
    /// `function name(a, b) { ... }`
    Function(FunctionDecl),
    /// `{ ... }`
    Block(Block),
    /// `return expr;`
    Return(Option<Spanned<Expr>>),
    /// `if (test) ... else ...`
    If(IfStmt),
    /// `for (init; test; update) ...`
    For(ForStmt),
    /// Expression statement
    Expr(Spanned<Expr>),
    /// A retained comment, text includes the `//` or `/* */` markers
    Comment(String),
}

impl Statement {
    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::VarDecl(_) => NodeKind::VariableDeclaration,
            Statement::Function(_) => NodeKind::FunctionDeclaration,
            Statement::Block(_) => NodeKind::BlockStatement,
            Statement::Return(_) => NodeKind::ReturnStatement,
            Statement::If(_) => NodeKind::IfStatement,
            Statement::For(_) => NodeKind::ForStatement,
            Statement::Expr(_) => NodeKind::ExpressionStatement,
            Statement::Comment(_) => NodeKind::Comment,
        }
    }

    /// True when printing `self` inline ends with an `if` that has no `else`.
    ///
    /// An `else` written right after such a statement would attach to that inner `if`, so an
    /// `if` consequent of this shape has to be braced.
    pub fn ends_with_open_if(&self) -> bool {
        match self {
            Statement::If(if_stmt) => match &if_stmt.alternate {
                Some(alternate) => alternate.node.ends_with_open_if(),
                None => true,
            },
            Statement::For(for_stmt) => for_stmt.body.node.ends_with_open_if(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Const,
    Let,
    Var,
}

impl DeclKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::Const => "const",
            DeclKind::Let => "let",
            DeclKind::Var => "var",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub kind: DeclKind,
    pub name: Spanned<Ident>,
    pub init: Option<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Spanned<Ident>,
    pub params: Vec<Spanned<Ident>>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub body: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub test: Spanned<Expr>,
    pub consequent: Box<Spanned<Statement>>,
    /// Either another `If` (an `else if` chain), a block, or a single statement
    pub alternate: Option<Box<Spanned<Statement>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<ForInit>,
    pub test: Option<Spanned<Expr>>,
    pub update: Option<Spanned<Expr>>,
    pub body: Box<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    VarDecl(Spanned<VarDecl>),
    Expr(Spanned<Expr>),
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Identifier use
    Ident(Ident),
    /// Literal
    Literal(Literal),
    /// Binary operation: `a + b`
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
    /// Assignment: `a = b`, `a += b`
    Assign(Box<Spanned<Expr>>, AssignOp, Box<Spanned<Expr>>),
    /// `++x`, `x--`
    Update {
        op: UpdateOp,
        prefix: bool,
        argument: Box<Spanned<Expr>>,
    },
    /// Function call: `f(a, b)`
    Call(Box<Spanned<Expr>>, Vec<Spanned<Expr>>),
    /// `obj.prop` or `obj[expr]`
    Member {
        object: Box<Spanned<Expr>>,
        property: MemberProperty,
    },
    /// `(a, b) => { ... }`
    Arrow(ArrowFunction),
    /// `{ key: value, ... }`
    Object(Vec<Property>),
    /// `[a, b, c]`
    Array(Vec<Spanned<Expr>>),
    /// Parenthesized expression
    Paren(Box<Spanned<Expr>>),
}

impl Expr {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Ident(_) => NodeKind::Identifier,
            Expr::Literal(_) => NodeKind::Literal,
            Expr::Binary(..) => NodeKind::BinaryExpression,
            Expr::Assign(..) => NodeKind::AssignmentExpression,
            Expr::Update { .. } => NodeKind::UpdateExpression,
            Expr::Call(..) => NodeKind::CallExpression,
            Expr::Member { .. } => NodeKind::MemberExpression,
            Expr::Arrow(_) => NodeKind::ArrowFunctionExpression,
            Expr::Object(_) => NodeKind::ObjectExpression,
            Expr::Array(_) => NodeKind::ArrayExpression,
            Expr::Paren(_) => NodeKind::ParenthesizedExpression,
        }
    }

    /// Binding strength when printed, used to decide where parentheses are needed.
    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Assign(..) => 0,
            Expr::Binary(_, op, _) => op.precedence() + 1,
            _ => u8::MAX,
        }
    }

    /// Whether `self` needs parentheses as the object of a member access or the callee of a call.
    pub fn needs_group_before_postfix(&self) -> bool {
        self.precedence() < u8::MAX || matches!(self, Expr::Update { prefix: true, .. })
    }

    /// Whether the printed form of `self` begins with `{`, counting the parentheses a printer
    /// adds around operands.
    ///
    /// A statement that begins with `{` reads as a block.
    pub fn starts_with_object(&self) -> bool {
        match self {
            Expr::Object(_) => true,
            Expr::Binary(left, op, _) => !op.groups_left(&left.node) && left.node.starts_with_object(),
            Expr::Assign(target, ..) => target.node.starts_with_object(),
            Expr::Call(callee, _) | Expr::Member { object: callee, .. } => {
                !callee.node.needs_group_before_postfix() && callee.node.starts_with_object()
            }
            Expr::Update {
                prefix: false, argument, ..
            } => argument.node.starts_with_object(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    /// `.name`: a property name, never a variable reference
    Named(Spanned<Ident>),
    /// `[expr]`
    Computed(Box<Spanned<Expr>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    pub params: Vec<Spanned<Ident>>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: Spanned<Ident>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
    Undefined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    pub fn from_operator(id: OperatorId) -> Option<BinaryOp> {
        Some(match id {
            OperatorId::Plus => BinaryOp::Add,
            OperatorId::Minus => BinaryOp::Sub,
            OperatorId::Star => BinaryOp::Mul,
            OperatorId::Slash => BinaryOp::Div,
            OperatorId::EqEq => BinaryOp::Eq,
            OperatorId::NotEq => BinaryOp::NotEq,
            OperatorId::Lt => BinaryOp::Lt,
            OperatorId::Gt => BinaryOp::Gt,
            OperatorId::LtEq => BinaryOp::LtEq,
            OperatorId::GtEq => BinaryOp::GtEq,
            OperatorId::AndAnd => BinaryOp::And,
            OperatorId::OrOr => BinaryOp::Or,
            _ => return None,
        })
    }

    /// Whether `operand` must be parenthesized to stay the left operand of `self`.
    pub fn groups_left(self, operand: &Expr) -> bool {
        operand.precedence() <= self.precedence()
    }

    /// Whether `operand` must be parenthesized to stay the right operand of `self`.
    ///
    /// Every level is left-associative, so an equal level on the right needs grouping too.
    pub fn groups_right(self, operand: &Expr) -> bool {
        operand.precedence() <= self.precedence() + 1
    }

    /// Precedence-climbing level; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Mul | BinaryOp::Div => 4,
            BinaryOp::Add | BinaryOp::Sub => 3,
            BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq => 2,
            BinaryOp::And => 1,
            BinaryOp::Or => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,    // =
    AddAssign, // +=
    SubAssign, // -=
    MulAssign, // *=
    DivAssign, // /=
}

impl AssignOp {
    pub fn from_operator(id: OperatorId) -> Option<AssignOp> {
        Some(match id {
            OperatorId::Eq => AssignOp::Assign,
            OperatorId::PlusEq => AssignOp::AddAssign,
            OperatorId::MinusEq => AssignOp::SubAssign,
            OperatorId::StarEq => AssignOp::MulAssign,
            OperatorId::SlashEq => AssignOp::DivAssign,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

impl UpdateOp {
    pub fn from_operator(id: OperatorId) -> Option<UpdateOp> {
        match id {
            OperatorId::PlusPlus => Some(UpdateOp::Increment),
            OperatorId::MinusMinus => Some(UpdateOp::Decrement),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOp::Increment => "++",
            UpdateOp::Decrement => "--",
        }
    }
}

impl fmt::Display for UpdateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Visitor trait for AST traversal
// ============================================================================

/// Read-only AST traversal.
///
/// Each `visit_*` method defaults to the matching `walk_*` function, which visits the node's
/// children. Override a method to intercept a node kind and call the `walk_*` function to keep
/// descending.
///
/// ## Notes
/// - Declaration-site names (variable and function names, parameters, object keys, `.prop`
///   member names) are never passed to [`Visitor::visit_ident`]; only identifier *uses* are.
/// - Function and arrow bodies are walked statement by statement, not through
///   [`Visitor::visit_block`], so a visitor sees a nested block only for a real `{ ... }`
///   statement.
pub trait Visitor {
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_statement(&mut self, stmt: &Spanned<Statement>) {
        walk_statement(self, stmt);
    }

    fn visit_var_decl(&mut self, decl: &VarDecl, _span: Span) {
        walk_var_decl(self, decl);
    }

    fn visit_function(&mut self, func: &FunctionDecl, _span: Span) {
        walk_function(self, func);
    }

    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block);
    }

    fn visit_expr(&mut self, expr: &Spanned<Expr>) {
        walk_expr(self, expr);
    }

    fn visit_arrow(&mut self, arrow: &ArrowFunction, _span: Span) {
        walk_arrow(self, arrow);
    }

    fn visit_ident(&mut self, _name: &Ident, _span: Span) {}

    fn visit_comment(&mut self, _text: &str, _span: Span) {}
}

pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, program: &Program) {
    for stmt in &program.body {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Spanned<Statement>) {
    match &stmt.node {
        Statement::VarDecl(decl) => visitor.visit_var_decl(decl, stmt.span),
        Statement::Function(func) => visitor.visit_function(func, stmt.span),
        Statement::Block(block) => visitor.visit_block(block),
        Statement::Return(argument) => {
            if let Some(argument) = argument {
                visitor.visit_expr(argument);
            }
        }
        Statement::If(if_stmt) => {
            visitor.visit_expr(&if_stmt.test);
            visitor.visit_statement(&if_stmt.consequent);
            if let Some(alternate) = &if_stmt.alternate {
                visitor.visit_statement(alternate);
            }
        }
        Statement::For(for_stmt) => {
            match &for_stmt.init {
                Some(ForInit::VarDecl(decl)) => visitor.visit_var_decl(&decl.node, decl.span),
                Some(ForInit::Expr(expr)) => visitor.visit_expr(expr),
                None => {}
            }
            if let Some(test) = &for_stmt.test {
                visitor.visit_expr(test);
            }
            if let Some(update) = &for_stmt.update {
                visitor.visit_expr(update);
            }
            visitor.visit_statement(&for_stmt.body);
        }
        Statement::Expr(expr) => visitor.visit_expr(expr),
        Statement::Comment(text) => visitor.visit_comment(text, stmt.span),
    }
}

pub fn walk_var_decl<V: Visitor + ?Sized>(visitor: &mut V, decl: &VarDecl) {
    if let Some(init) = &decl.init {
        visitor.visit_expr(init);
    }
}

pub fn walk_function<V: Visitor + ?Sized>(visitor: &mut V, func: &FunctionDecl) {
    walk_block(visitor, &func.body);
}

pub fn walk_arrow<V: Visitor + ?Sized>(visitor: &mut V, arrow: &ArrowFunction) {
    walk_block(visitor, &arrow.body);
}

pub fn walk_block<V: Visitor + ?Sized>(visitor: &mut V, block: &Block) {
    for stmt in &block.body {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Spanned<Expr>) {
    match &expr.node {
        Expr::Ident(name) => visitor.visit_ident(name, expr.span),
        Expr::Literal(_) => {}
        Expr::Binary(left, _, right) | Expr::Assign(left, _, right) => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::Update { argument, .. } => visitor.visit_expr(argument),
        Expr::Call(callee, args) => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::Member { object, property } => {
            visitor.visit_expr(object);
            if let MemberProperty::Computed(index) = property {
                visitor.visit_expr(index);
            }
        }
        Expr::Arrow(arrow) => visitor.visit_arrow(arrow, expr.span),
        Expr::Object(properties) => {
            for property in properties {
                visitor.visit_expr(&property.value);
            }
        }
        Expr::Array(elements) => {
            for element in elements {
                visitor.visit_expr(element);
            }
        }
        Expr::Paren(inner) => visitor.visit_expr(inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str, at: usize) -> Spanned<Expr> {
        Spanned::new(Expr::Ident(name.to_string()), Span::new(at, at + name.len()))
    }

    struct IdentCollector(Vec<String>);

    impl Visitor for IdentCollector {
        fn visit_ident(&mut self, name: &Ident, _span: Span) {
            self.0.push(name.clone());
        }
    }

    #[test]
    fn test_visitor_skips_structural_names() {
        // obj.prop[index]
        let member = Expr::Member {
            object: Box::new(Spanned::new(
                Expr::Member {
                    object: Box::new(ident("obj", 0)),
                    property: MemberProperty::Named(Spanned::new("prop".to_string(), Span::new(4, 8))),
                },
                Span::new(0, 8),
            )),
            property: MemberProperty::Computed(Box::new(ident("index", 9))),
        };
        let program = Program {
            body: vec![Spanned::new(
                Statement::Expr(Spanned::new(member, Span::new(0, 15))),
                Span::new(0, 15),
            )],
        };

        let mut collector = IdentCollector(Vec::new());
        collector.visit_program(&program);
        assert_eq!(collector.0, vec!["obj", "index"]);
    }

    #[test]
    fn test_binary_precedence_table() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() > BinaryOp::Lt.precedence());
        assert_eq!(BinaryOp::Eq.precedence(), BinaryOp::GtEq.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
    }

    #[test]
    fn test_node_kind_display() {
        let stmt = Statement::Return(None);
        assert_eq!(stmt.kind().to_string(), "ReturnStatement");
        assert_eq!(Expr::Literal(Literal::Null).kind().to_string(), "Literal");
    }

    fn unspanned(expr: Expr) -> Box<Spanned<Expr>> {
        Box::new(Spanned::new(expr, Span::default()))
    }

    fn bin(left: Expr, op: BinaryOp, right: Expr) -> Expr {
        Expr::Binary(unspanned(left), op, unspanned(right))
    }

    fn name(text: &str) -> Expr {
        Expr::Ident(text.to_string())
    }

    #[test]
    fn test_operand_grouping() {
        let sum = bin(name("a"), BinaryOp::Add, name("b"));
        assert!(BinaryOp::Mul.groups_left(&sum));
        assert!(BinaryOp::Mul.groups_right(&sum));
        assert!(!BinaryOp::Sub.groups_left(&sum));
        assert!(BinaryOp::Sub.groups_right(&sum));
        assert!(!BinaryOp::Lt.groups_right(&sum));
        assert!(!BinaryOp::Add.groups_left(&name("c")));
    }

    #[test]
    fn test_starts_with_object() {
        let object = Expr::Object(Vec::new());
        assert!(object.starts_with_object());
        assert!(bin(object.clone(), BinaryOp::Add, name("a")).starts_with_object());
        assert!(!bin(name("a"), BinaryOp::Add, object.clone()).starts_with_object());
        // `({} + a) * b` starts with a parenthesis
        let grouped = bin(bin(object.clone(), BinaryOp::Add, name("a")), BinaryOp::Mul, name("b"));
        assert!(!grouped.starts_with_object());
        assert!(!Expr::Paren(unspanned(object)).starts_with_object());
    }

    #[test]
    fn test_ends_with_open_if() {
        let open = Statement::If(IfStmt {
            test: Spanned::new(name("a"), Span::default()),
            consequent: Box::new(Spanned::new(Statement::Return(None), Span::default())),
            alternate: None,
        });
        assert!(open.ends_with_open_if());
        let closed = Statement::If(IfStmt {
            test: Spanned::new(name("b"), Span::default()),
            consequent: Box::new(Spanned::new(Statement::Return(None), Span::default())),
            alternate: Some(Box::new(Spanned::new(open.clone(), Span::default()))),
        });
        assert!(closed.ends_with_open_if());
        assert!(!Statement::Block(Block { body: vec![Spanned::new(open, Span::default())] }).ends_with_open_if());
    }
}
