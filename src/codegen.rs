//! Fixed-style code generator
//!
//! Prints a subset of the AST back to source text with a single fixed layout: blocks are
//! flat (no indentation), literals are inline, binary operators are spaced. Nodes outside the
//! supported subset stop generation with [`UnsupportedNodeError`].
//!
//! Supported: programs, variable declarations, literals, identifiers, binary expressions,
//! arrays, objects, `return`, blocks, function declarations, `if`, and expression statements
//! or parentheses wrapping those.
//!
//! ## Examples
//!
//! ```rust
//! let program = brace_syntax::parse_source("function id(x) { return x; }").unwrap();
//! assert_eq!(brace::codegen::generate(&program).unwrap(), "function id(x) {\nreturn x;\n}");
//! ```

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::format::format_literal;
use crate::frontend::ast::*;

/// The generator met a node kind it has no layout for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("code generation does not support {kind} nodes")]
pub struct UnsupportedNodeError {
    pub kind: NodeKind,
}

impl Diagnostic for UnsupportedNodeError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("brace::codegen"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("use `brace fmt` to print programs that use every construct"))
    }
}

type GenResult = Result<String, UnsupportedNodeError>;

fn unsupported(kind: NodeKind) -> GenResult {
    Err(UnsupportedNodeError { kind })
}

/// Generate source text for `program`.
///
/// ## Errors
/// Returns [`UnsupportedNodeError`] naming the first unsupported node met, in source order.
#[tracing::instrument(skip_all, fields(statements = program.body.len()))]
pub fn generate(program: &Program) -> GenResult {
    let lines = program
        .body
        .iter()
        .map(|stmt| statement(&stmt.node))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

fn statement(stmt: &Statement) -> GenResult {
    match stmt {
        Statement::VarDecl(decl) => Ok(match &decl.init {
            Some(init) => format!("{} {} = {};", decl.kind, decl.name.node, expr(&init.node)?),
            None => format!("{} {};", decl.kind, decl.name.node),
        }),
        Statement::Function(func) => {
            let params: Vec<&str> = func.params.iter().map(|p| p.node.as_str()).collect();
            Ok(format!(
                "function {}({}) {}",
                func.name.node,
                params.join(", "),
                block(&func.body)?
            ))
        }
        Statement::Block(b) => block(b),
        Statement::Return(None) => Ok("return;".to_string()),
        Statement::Return(Some(argument)) => Ok(format!("return {};", expr(&argument.node)?)),
        Statement::If(if_stmt) => {
            let consequent = &if_stmt.consequent.node;
            let consequent = if if_stmt.alternate.is_some() && consequent.ends_with_open_if() {
                format!("{{\n{}\n}}", statement(consequent)?)
            } else {
                statement(consequent)?
            };
            let mut code = format!("if ({}) {}", expr(&if_stmt.test.node)?, consequent);
            if let Some(alternate) = &if_stmt.alternate {
                code.push_str(" else ");
                code.push_str(&statement(&alternate.node)?);
            }
            Ok(code)
        }
        Statement::Expr(e) => Ok(format!("{};", grouped(&e.node, e.node.starts_with_object())?)),
        Statement::For(_) | Statement::Comment(_) => unsupported(stmt.kind()),
    }
}

fn block(b: &Block) -> GenResult {
    let lines = b
        .body
        .iter()
        .map(|stmt| statement(&stmt.node))
        .collect::<Result<Vec<_>, _>>()?;
    if lines.is_empty() {
        Ok("{\n}".to_string())
    } else {
        Ok(format!("{{\n{}\n}}", lines.join("\n")))
    }
}

fn expr(e: &Expr) -> GenResult {
    match e {
        Expr::Ident(name) => Ok(name.clone()),
        Expr::Literal(lit) => Ok(format_literal(lit)),
        Expr::Binary(left, op, right) => Ok(format!(
            "{} {} {}",
            grouped(&left.node, op.groups_left(&left.node))?,
            op,
            grouped(&right.node, op.groups_right(&right.node))?
        )),
        Expr::Array(elements) => Ok(format!("[{}]", list(elements.iter().map(|el| expr(&el.node)))?)),
        Expr::Object(properties) => Ok(format!(
            "{{{}}}",
            list(
                properties
                    .iter()
                    .map(|p| Ok(format!("{}: {}", p.key.node, expr(&p.value.node)?)))
            )?
        )),
        Expr::Paren(inner) => Ok(format!("({})", expr(&inner.node)?)),
        Expr::Arrow(_) | Expr::Call(..) | Expr::Member { .. } | Expr::Assign(..) | Expr::Update { .. } => {
            unsupported(e.kind())
        }
    }
}

/// Print `e`, wrapped in parentheses when `wrap` is set.
fn grouped(e: &Expr, wrap: bool) -> GenResult {
    let code = expr(e)?;
    Ok(if wrap { format!("({})", code) } else { code })
}

fn list(items: impl Iterator<Item = GenResult>) -> GenResult {
    Ok(items.collect::<Result<Vec<_>, _>>()?.join(", "))
}
