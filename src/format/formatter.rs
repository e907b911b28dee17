//! Core formatting logic for brace source code
//!
//! Walks the AST and emits properly formatted source code.

use super::config::FormatConfig;
use super::writer::FormatWriter;
use crate::frontend::ast::*;
use crate::frontend::lexer::quote_string;

/// Formatter that transforms AST back to formatted source code
pub struct Formatter {
    writer: FormatWriter,
    config: FormatConfig,
}

impl Formatter {
    /// Create a new formatter with the given config
    pub fn new(config: FormatConfig) -> Self {
        Self {
            writer: FormatWriter::new(config.indent_width),
            config,
        }
    }

    /// Format a program and return the formatted source
    pub fn format(mut self, program: &Program) -> String {
        self.format_program(program);
        self.writer.finish()
    }

    // ========================================================================
    // Program
    // ========================================================================

    fn format_program(&mut self, program: &Program) {
        for stmt in &program.body {
            self.format_statement(&stmt.node);
            self.writer.newline();
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Write a statement without its trailing newline.
    fn format_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::VarDecl(decl) => {
                self.format_var_decl(decl);
                self.writer.write(";");
            }
            Statement::Function(func) => self.format_function(func),
            Statement::Block(block) => self.format_block(block),
            Statement::Return(argument) => {
                self.writer.write("return");
                if let Some(argument) = argument {
                    self.writer.write(" ");
                    self.format_expr(&argument.node);
                }
                self.writer.write(";");
            }
            Statement::If(if_stmt) => self.format_if(if_stmt),
            Statement::For(for_stmt) => self.format_for(for_stmt),
            Statement::Expr(expr) => {
                // A leading `{` would read back as a block
                self.format_operand(&expr.node, expr.node.starts_with_object());
                self.writer.write(";");
            }
            Statement::Comment(text) => self.writer.write(text),
        }
    }

    fn format_var_decl(&mut self, decl: &VarDecl) {
        self.writer.write(decl.kind.as_str());
        self.writer.write(" ");
        self.writer.write(&decl.name.node);
        if let Some(init) = &decl.init {
            self.writer.write(" = ");
            self.format_expr(&init.node);
        }
    }

    fn format_function(&mut self, func: &FunctionDecl) {
        self.writer.write("function ");
        self.writer.write(&func.name.node);
        self.format_params(&func.params);
        self.writer.write(" ");
        self.format_block(&func.body);
    }

    fn format_params(&mut self, params: &[Spanned<Ident>]) {
        self.writer.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.writer.write(self.config.comma());
            }
            self.writer.write(&param.node);
        }
        self.writer.write(")");
    }

    fn format_block(&mut self, block: &Block) {
        if block.body.is_empty() {
            self.writer.write("{}");
            return;
        }
        self.writer.writeln("{");
        self.writer.indent();
        for stmt in &block.body {
            self.format_statement(&stmt.node);
            self.writer.newline();
        }
        self.writer.dedent();
        self.writer.write("}");
    }

    fn format_if(&mut self, if_stmt: &IfStmt) {
        self.writer.write("if (");
        self.format_expr(&if_stmt.test.node);
        self.writer.write(") ");
        let consequent = &if_stmt.consequent.node;
        if if_stmt.alternate.is_some() && consequent.ends_with_open_if() {
            self.format_braced(consequent);
        } else {
            self.format_statement(consequent);
        }
        if let Some(alternate) = &if_stmt.alternate {
            self.writer.write(" else ");
            self.format_statement(&alternate.node);
        }
    }

    /// Write `stmt` inside braces, laid out like a one-statement block.
    fn format_braced(&mut self, stmt: &Statement) {
        self.writer.writeln("{");
        self.writer.indent();
        self.format_statement(stmt);
        self.writer.newline();
        self.writer.dedent();
        self.writer.write("}");
    }

    fn format_for(&mut self, for_stmt: &ForStmt) {
        self.writer.write("for (");
        match &for_stmt.init {
            Some(ForInit::VarDecl(decl)) => self.format_var_decl(&decl.node),
            Some(ForInit::Expr(expr)) => self.format_expr(&expr.node),
            None => {}
        }
        self.writer.write(";");
        if let Some(test) = &for_stmt.test {
            self.writer.write(" ");
            self.format_expr(&test.node);
        }
        self.writer.write(";");
        if let Some(update) = &for_stmt.update {
            self.writer.write(" ");
            self.format_expr(&update.node);
        }
        self.writer.write(")");

        if let Statement::Block(block) = &for_stmt.body.node {
            self.writer.write(" ");
            self.format_block(block);
        } else {
            // Single statement bodies go on their own line
            self.writer.newline();
            self.writer.indent();
            self.format_statement(&for_stmt.body.node);
            self.writer.dedent();
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn format_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(name) => self.writer.write(name),
            Expr::Literal(lit) => self.writer.write(&format_literal(lit)),
            Expr::Binary(left, op, right) => {
                let group_right = op.groups_right(&right.node);
                self.format_operand(&left.node, op.groups_left(&left.node));
                self.format_operator(op.as_str(), &right.node, group_right);
                self.format_operand(&right.node, group_right);
            }
            Expr::Assign(target, op, value) => {
                self.format_expr(&target.node);
                self.format_operator(op.as_str(), &value.node, false);
                self.format_expr(&value.node);
            }
            Expr::Update { op, prefix, argument } => {
                if *prefix {
                    self.writer.write(op.as_str());
                    self.format_expr(&argument.node);
                } else {
                    self.format_expr(&argument.node);
                    self.writer.write(op.as_str());
                }
            }
            Expr::Call(callee, args) => {
                self.format_operand(&callee.node, callee.node.needs_group_before_postfix());
                self.writer.write("(");
                self.format_inline_list(args);
                self.writer.write(")");
            }
            Expr::Member { object, property } => {
                self.format_operand(&object.node, object.node.needs_group_before_postfix());
                match property {
                    MemberProperty::Named(name) => {
                        self.writer.write(".");
                        self.writer.write(&name.node);
                    }
                    MemberProperty::Computed(index) => {
                        self.writer.write("[");
                        self.format_expr(&index.node);
                        self.writer.write("]");
                    }
                }
            }
            Expr::Arrow(arrow) => {
                self.format_params(&arrow.params);
                self.writer.write(" => ");
                self.format_block(&arrow.body);
            }
            Expr::Object(properties) => self.format_object(properties),
            Expr::Array(elements) => self.format_array(elements),
            Expr::Paren(inner) => {
                self.writer.write("(");
                self.format_expr(&inner.node);
                self.writer.write(")");
            }
        }
    }

    /// Write `expr`, wrapped in parentheses when `group` is set.
    fn format_operand(&mut self, expr: &Expr, group: bool) {
        if group {
            self.writer.write("(");
            self.format_expr(expr);
            self.writer.write(")");
        } else {
            self.format_expr(expr);
        }
    }

    /// Write a binary or assignment operator, spaced per config.
    fn format_operator(&mut self, op: &str, right: &Expr, right_grouped: bool) {
        // `a+ ++b` must not collapse into `a+++b`
        let glued = !right_grouped
            && leading_prefix_update(right).is_some_and(|update| op.ends_with(&update.as_str()[..1]));
        if self.config.space_around_operators || glued {
            self.writer.write(" ");
            self.writer.write(op);
            self.writer.write(" ");
        } else {
            self.writer.write(op);
        }
    }

    fn format_inline_list(&mut self, items: &[Spanned<Expr>]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.writer.write(self.config.comma());
            }
            self.format_expr(&item.node);
        }
    }

    fn format_object(&mut self, properties: &[Property]) {
        if properties.is_empty() {
            self.writer.write("{}");
        } else if self.config.break_long_constructs {
            self.writer.writeln("{");
            self.writer.indent();
            for (i, property) in properties.iter().enumerate() {
                if i > 0 {
                    self.writer.writeln(",");
                }
                self.format_property(property);
            }
            self.writer.newline();
            self.writer.dedent();
            self.writer.write("}");
        } else {
            self.writer.write("{");
            for (i, property) in properties.iter().enumerate() {
                if i > 0 {
                    self.writer.write(self.config.comma());
                }
                self.format_property(property);
            }
            self.writer.write("}");
        }
    }

    fn format_property(&mut self, property: &Property) {
        self.writer.write(&property.key.node);
        self.writer.write(": ");
        self.format_expr(&property.value.node);
    }

    fn format_array(&mut self, elements: &[Spanned<Expr>]) {
        if elements.is_empty() {
            self.writer.write("[]");
        } else if self.config.break_long_constructs {
            self.writer.writeln("[");
            self.writer.indent();
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    self.writer.writeln(",");
                }
                self.format_expr(&element.node);
            }
            self.writer.newline();
            self.writer.dedent();
            self.writer.write("]");
        } else {
            self.writer.write("[");
            self.format_inline_list(elements);
            self.writer.write("]");
        }
    }
}

/// The prefix update operator that `expr` prints first, if any.
fn leading_prefix_update(expr: &Expr) -> Option<UpdateOp> {
    match expr {
        Expr::Update { op, prefix: true, .. } => Some(*op),
        Expr::Update { argument, .. } => leading_prefix_update(&argument.node),
        Expr::Binary(left, op, _) if !op.groups_left(&left.node) => leading_prefix_update(&left.node),
        Expr::Assign(target, ..) => leading_prefix_update(&target.node),
        Expr::Call(callee, _) | Expr::Member { object: callee, .. } if !callee.node.needs_group_before_postfix() => {
            leading_prefix_update(&callee.node)
        }
        _ => None,
    }
}

/// Source spelling of a literal. Strings are re-quoted with double quotes.
pub(crate) fn format_literal(lit: &Literal) -> String {
    match lit {
        Literal::Number(n) => n.to_string(),
        Literal::String(s) => quote_string(s),
        Literal::Bool(b) => b.to_string(),
        Literal::Null => "null".to_string(),
        Literal::Undefined => "undefined".to_string(),
    }
}
