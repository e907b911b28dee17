//! Name resolution for brace programs
//!
//! A single walk over the AST with an explicit scope stack. Every identifier use is resolved
//! against the innermost enclosing declaration of that name; the walk records reference counts,
//! a per-name usage log, and three kinds of findings: undefined references, unused bindings and
//! duplicate declarations.
//!
//! ## Scoping rules
//!
//! - A function declaration binds its name in the **enclosing** scope, then opens a `function`
//!   scope holding its parameters and body statements (no extra block scope for the body).
//! - An arrow function opens an `arrow` scope the same way, with no self-binding.
//! - Any other `{ ... }` opens a `block` scope.
//! - A variable is declared before its initializer is walked, so `let x = x;` resolves to itself.
//! - `for` initializers declare into the enclosing scope.
//!
//! Resolution never fails: findings are data in the returned [`Resolution`].
//!
//! ## Examples
//!
//! ```rust
//! use brace::frontend::resolver::resolve;
//!
//! let program = brace_syntax::parse_source("const a = 1; log(a);").unwrap();
//! let resolution = resolve(&program);
//! assert_eq!(resolution.undefined.len(), 1); // `log`
//! assert!(resolution.unused.is_empty());
//! ```

use std::collections::BTreeMap;

use crate::frontend::ast::{self, ArrowFunction, Block, FunctionDecl, Ident, Program, Span, VarDecl, Visitor};
use crate::frontend::symbols::{Scope, ScopeId, ScopeKind, Symbol, SymbolKind, SymbolTable};

// ============================================================================
// Findings
// ============================================================================

/// An identifier use with no visible declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedReference {
    pub name: String,
    pub offset: usize,
}

/// A binding that was never referenced before its scope closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedSymbol {
    pub name: String,
    pub kind: SymbolKind,
    pub scope: ScopeId,
    pub offset: usize,
}

/// A second declaration of a name in a scope that already declares it.
///
/// The first declaration stays authoritative; the second is not bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redeclaration {
    pub name: String,
    pub kind: SymbolKind,
    pub scope: ScopeId,
    pub offset: usize,
    pub first_offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    Declaration,
    Reference,
}

/// One entry in the usage log of a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub kind: UsageKind,
    pub scope: ScopeId,
    pub offset: usize,
}

/// Everything one resolution run learned about a program.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// All scopes, indexed by [`ScopeId::ordinal`]; global first.
    pub scopes: Vec<Scope>,
    pub symbols: Vec<Symbol>,
    pub undefined: Vec<UndefinedReference>,
    /// In scope-close order; symbols of one scope in declaration order.
    pub unused: Vec<UnusedSymbol>,
    pub redeclarations: Vec<Redeclaration>,
    /// Declarations and references per name, in walk order.
    pub usages: BTreeMap<String, Vec<Usage>>,
}

impl Resolution {
    /// Look up a scope by id.
    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.ordinal).filter(|scope| scope.id == id)
    }

    /// All symbols with the given name, in declaration order.
    pub fn symbols_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols.iter().filter(move |symbol| symbol.name == name)
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolver state for a single run. Consumed by [`Resolver::run`].
#[derive(Debug, Default)]
pub struct Resolver {
    table: SymbolTable,
    undefined: Vec<UndefinedReference>,
    unused: Vec<UnusedSymbol>,
    redeclarations: Vec<Redeclaration>,
    usages: BTreeMap<String, Vec<Usage>>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `program` and return the resolution. The global scope is closed at the end.
    pub fn run(mut self, program: &Program) -> Resolution {
        self.visit_program(program);
        self.close_scope();
        self.finish()
    }

    fn finish(self) -> Resolution {
        let (scopes, symbols) = self.table.into_parts();
        Resolution {
            scopes,
            symbols,
            undefined: self.undefined,
            unused: self.unused,
            redeclarations: self.redeclarations,
            usages: self.usages,
        }
    }

    fn open_scope(&mut self, kind: ScopeKind) -> ScopeId {
        let id = self.table.enter_scope(kind);
        tracing::trace!(scope = %id, "enter scope");
        id
    }

    /// Close the current scope, reporting its unreferenced symbols.
    fn close_scope(&mut self) {
        let scope = self.table.current_scope();
        for symbol in self.table.symbols_in(scope) {
            if symbol.reference_count == 0 {
                self.unused.push(UnusedSymbol {
                    name: symbol.name.clone(),
                    kind: symbol.kind,
                    scope,
                    offset: symbol.declared_at,
                });
            }
        }
        self.table.exit_scope();
        tracing::trace!(scope = %scope, "exit scope");
    }

    fn declare(&mut self, name: &str, kind: SymbolKind, offset: usize) {
        let scope = self.table.current_scope();
        match self.table.declare(name, kind, offset) {
            Ok(_) => self.record_usage(name, UsageKind::Declaration, scope, offset),
            Err(duplicate) => {
                let first_offset = self
                    .table
                    .get(duplicate.existing)
                    .map_or(offset, |symbol| symbol.declared_at);
                tracing::debug!(%name, %scope, offset, "duplicate declaration");
                self.redeclarations.push(Redeclaration {
                    name: name.to_string(),
                    kind,
                    scope,
                    offset,
                    first_offset,
                });
            }
        }
    }

    fn record_usage(&mut self, name: &str, kind: UsageKind, scope: ScopeId, offset: usize) {
        self.usages
            .entry(name.to_string())
            .or_default()
            .push(Usage { kind, scope, offset });
    }

    fn declare_params(&mut self, params: &[ast::Spanned<Ident>]) {
        for param in params {
            self.declare(&param.node, SymbolKind::Parameter, param.span.start);
        }
    }
}

impl Visitor for Resolver {
    fn visit_var_decl(&mut self, decl: &VarDecl, _span: Span) {
        self.declare(&decl.name.node, SymbolKind::Variable, decl.name.span.start);
        ast::walk_var_decl(self, decl);
    }

    fn visit_function(&mut self, func: &FunctionDecl, _span: Span) {
        self.declare(&func.name.node, SymbolKind::Function, func.name.span.start);
        self.open_scope(ScopeKind::Function);
        self.declare_params(&func.params);
        ast::walk_function(self, func);
        self.close_scope();
    }

    fn visit_arrow(&mut self, arrow: &ArrowFunction, _span: Span) {
        self.open_scope(ScopeKind::Arrow);
        self.declare_params(&arrow.params);
        ast::walk_arrow(self, arrow);
        self.close_scope();
    }

    fn visit_block(&mut self, block: &Block) {
        self.open_scope(ScopeKind::Block);
        ast::walk_block(self, block);
        self.close_scope();
    }

    fn visit_ident(&mut self, name: &Ident, span: Span) {
        let scope = self.table.current_scope();
        match self.table.lookup(name) {
            Some(id) => {
                self.table.add_reference(id);
                self.record_usage(name, UsageKind::Reference, scope, span.start);
            }
            None => {
                tracing::debug!(%name, offset = span.start, "undefined reference");
                self.undefined.push(UndefinedReference {
                    name: name.clone(),
                    offset: span.start,
                });
            }
        }
    }
}

/// Resolve every identifier in `program`.
///
/// Each call builds a fresh [`Resolver`], so independent calls share no state.
#[tracing::instrument(skip_all, fields(statements = program.body.len()))]
pub fn resolve(program: &Program) -> Resolution {
    Resolver::new().run(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_str(source: &str) -> Resolution {
        let program = brace_syntax::parse_source(source).unwrap();
        resolve(&program)
    }

    #[test]
    fn test_shadowing_in_nested_function() {
        let source = "function outer() {\n  const x = 1;\n  function inner() {\n    const x = 2;\n    return x;\n  }\n  inner();\n  return x;\n}\nouter();";
        let resolution = resolve_str(source);

        let xs: Vec<_> = resolution.symbols_named("x").collect();
        assert_eq!(xs.len(), 2);
        assert_eq!(xs[0].scope.to_string(), "function_1");
        assert_eq!(xs[1].scope.to_string(), "function_2");
        assert_eq!(xs[0].reference_count, 1);
        assert_eq!(xs[1].reference_count, 1);

        let inner_return = source.find("return x").unwrap() + 7;
        let outer_return = source.rfind("return x").unwrap() + 7;
        let refs: Vec<_> = resolution.usages["x"]
            .iter()
            .filter(|u| u.kind == UsageKind::Reference)
            .map(|u| (u.scope.to_string(), u.offset))
            .collect();
        assert_eq!(
            refs,
            vec![
                ("function_2".to_string(), inner_return),
                ("function_1".to_string(), outer_return),
            ]
        );
        assert!(resolution.undefined.is_empty());
        assert!(resolution.unused.is_empty());
    }

    #[test]
    fn test_unreferenced_const_is_unused_once() {
        let resolution = resolve_str("const a = 1;");
        assert_eq!(
            resolution.unused,
            vec![UnusedSymbol {
                name: "a".to_string(),
                kind: SymbolKind::Variable,
                scope: ScopeId::GLOBAL,
                offset: 6,
            }]
        );

        let resolution = resolve_str("const a = 1; a;");
        assert!(resolution.unused.is_empty());
    }

    #[test]
    fn test_undefined_reference_reported_at_use() {
        let resolution = resolve_str("let total = 0;\ntotal = totl + 1;");
        assert_eq!(
            resolution.undefined,
            vec![UndefinedReference {
                name: "totl".to_string(),
                offset: 23,
            }]
        );
    }

    #[test]
    fn test_function_name_bound_in_enclosing_scope() {
        let resolution = resolve_str("function f(a) { return a; }\nf(1);");
        let f = resolution.symbols_named("f").next().unwrap();
        assert_eq!(f.scope, ScopeId::GLOBAL);
        assert_eq!(f.kind, SymbolKind::Function);
        let a = resolution.symbols_named("a").next().unwrap();
        assert_eq!(a.kind, SymbolKind::Parameter);
        assert_eq!(a.scope.to_string(), "function_1");
        // Body statements live directly in the function scope.
        assert_eq!(resolution.scopes.len(), 2);
    }

    #[test]
    fn test_unused_parameter_and_function() {
        let resolution = resolve_str("function f(a, b) { return a; }");
        let unused: Vec<_> = resolution
            .unused
            .iter()
            .map(|u| (u.name.as_str(), u.kind, u.scope.to_string()))
            .collect();
        assert_eq!(
            unused,
            vec![
                ("b", SymbolKind::Parameter, "function_1".to_string()),
                ("f", SymbolKind::Function, "global".to_string()),
            ]
        );
    }

    #[test]
    fn test_arrow_scope_and_block_scope() {
        let resolution = resolve_str("const g = (n) => { return n * 2; };\nif (g(1)) { let y = 3; }");
        let kinds: Vec<_> = resolution.scopes.iter().map(|s| s.id.to_string()).collect();
        assert_eq!(kinds, vec!["global", "arrow_1", "block_2"]);
        assert_eq!(resolution.unused.len(), 1);
        assert_eq!(resolution.unused[0].name, "y");
        assert_eq!(resolution.unused[0].scope.to_string(), "block_2");
    }

    #[test]
    fn test_declared_before_initializer() {
        let resolution = resolve_str("let x = x;");
        assert!(resolution.undefined.is_empty());
        assert!(resolution.unused.is_empty());
    }

    #[test]
    fn test_for_init_declares_in_enclosing_scope() {
        let resolution = resolve_str("for (let i = 0; i < 3; i++) { log(i); }");
        let i = resolution.symbols_named("i").next().unwrap();
        assert_eq!(i.scope, ScopeId::GLOBAL);
        assert_eq!(i.reference_count, 3);
    }

    #[test]
    fn test_structural_names_are_not_references() {
        let resolution = resolve_str("const o = { key: 1 };\no.key;\no[key];");
        let names: Vec<_> = resolution.undefined.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["key"]);
    }

    #[test]
    fn test_redeclaration_keeps_first_binding() {
        let resolution = resolve_str("let a = 1;\nlet a = 2;\na;");
        assert_eq!(
            resolution.redeclarations,
            vec![Redeclaration {
                name: "a".to_string(),
                kind: SymbolKind::Variable,
                scope: ScopeId::GLOBAL,
                offset: 15,
                first_offset: 4,
            }]
        );
        let symbols: Vec<_> = resolution.symbols_named("a").collect();
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].reference_count, 1);
    }

    #[test]
    fn test_every_scope_parent_exists() {
        let resolution = resolve_str("function f() { { const g = () => { { } }; g(); } }\nf();");
        for scope in &resolution.scopes {
            if let Some(parent) = scope.parent {
                assert!(resolution.scope(parent).is_some());
            } else {
                assert_eq!(scope.id, ScopeId::GLOBAL);
            }
        }
    }

    #[test]
    fn test_independent_runs_restart_numbering() {
        let first = resolve_str("{ }");
        let second = resolve_str("{ }");
        assert_eq!(first.scopes[1].id, second.scopes[1].id);
    }
}
