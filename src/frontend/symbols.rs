//! Symbol table and scope management for brace
//!
//! Tracks every declared name (variables, parameters, functions) and the scope it lives in.
//! Scopes form a tree rooted at the global scope; the table keeps a cursor on the innermost
//! open scope and walks parent links for lookups.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Unique identifier for symbols
pub type SymbolId = usize;

/// Symbol table managing all named entities of one resolution run
#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    current_scope: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Create a table holding only the global scope.
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            scopes: vec![Scope::new(ScopeId::GLOBAL, None)],
            current_scope: 0,
        }
    }

    /// Enter a new scope nested in the current one and return its id.
    ///
    /// Ordinals come from a counter that starts at 1 (global is 0) and never repeats.
    pub fn enter_scope(&mut self, kind: ScopeKind) -> ScopeId {
        let id = ScopeId::new(kind, self.scopes.len());
        let parent = self.scopes[self.current_scope].id;
        self.scopes.push(Scope::new(id, Some(parent)));
        self.current_scope = id.ordinal;
        id
    }

    /// Exit the current scope and return the id of the scope that was closed.
    ///
    /// Exiting the global scope leaves the cursor on it.
    pub fn exit_scope(&mut self) -> ScopeId {
        let closed = self.scopes[self.current_scope].id;
        if let Some(parent) = self.scopes[self.current_scope].parent {
            self.current_scope = parent.ordinal;
        }
        closed
    }

    /// Id of the innermost open scope.
    pub fn current_scope(&self) -> ScopeId {
        self.scopes[self.current_scope].id
    }

    /// Declare a new symbol in the current scope.
    ///
    /// ## Errors
    /// Returns [`DuplicateSymbol`] if the name is already declared in the current scope. The
    /// existing symbol is left untouched.
    pub fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        declared_at: usize,
    ) -> Result<SymbolId, DuplicateSymbol> {
        let scope = self.current_scope();
        if let Some(existing) = self.lookup_local(name) {
            return Err(DuplicateSymbol {
                name: name.to_string(),
                existing,
                scope,
            });
        }

        let id = self.symbols.len();
        self.scopes[self.current_scope].symbols.insert(name.to_string(), id);
        self.symbols.push(Symbol {
            name: name.to_string(),
            kind,
            reference_count: 0,
            declared_at,
            scope,
        });
        Ok(id)
    }

    /// Look up a symbol by name in the current scope chain, innermost first
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        let mut scope_idx = self.current_scope;
        loop {
            if let Some(&id) = self.scopes[scope_idx].symbols.get(name) {
                return Some(id);
            }
            match self.scopes[scope_idx].parent {
                Some(parent) => scope_idx = parent.ordinal,
                None => return None,
            }
        }
    }

    /// Look up a symbol only in the current scope (no parent lookup)
    pub fn lookup_local(&self, name: &str) -> Option<SymbolId> {
        self.scopes[self.current_scope].symbols.get(name).copied()
    }

    /// Count one reference to `id`.
    pub fn add_reference(&mut self, id: SymbolId) {
        if let Some(symbol) = self.symbols.get_mut(id) {
            symbol.reference_count += 1;
        }
    }

    /// Get a symbol by ID
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Get a scope by ID
    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.ordinal).filter(|scope| scope.id == id)
    }

    /// Symbols declared directly in `scope`, in declaration order.
    pub fn symbols_in(&self, scope: ScopeId) -> Vec<&Symbol> {
        let Some(scope) = self.scope(scope) else {
            return Vec::new();
        };
        let mut ids: Vec<SymbolId> = scope.symbols.values().copied().collect();
        ids.sort_unstable();
        ids.into_iter().filter_map(|id| self.symbols.get(id)).collect()
    }

    /// Consume the table, returning every scope and symbol it recorded.
    pub fn into_parts(self) -> (Vec<Scope>, Vec<Symbol>) {
        (self.scopes, self.symbols)
    }
}

/// A second declaration of `name` in the scope that already holds `existing`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{name}' is already declared in scope {scope}")]
pub struct DuplicateSymbol {
    pub name: String,
    pub existing: SymbolId,
    pub scope: ScopeId,
}

/// A scope (global, function, arrow, block)
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    pub symbols: HashMap<String, SymbolId>,
}

impl Scope {
    pub fn new(id: ScopeId, parent: Option<ScopeId>) -> Self {
        Self {
            id,
            parent,
            symbols: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    Function,
    Arrow,
    Block,
}

impl ScopeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScopeKind::Global => "global",
            ScopeKind::Function => "function",
            ScopeKind::Arrow => "arrow",
            ScopeKind::Block => "block",
        }
    }
}

/// Scope identity: a kind tag plus the ordinal it was created with.
///
/// Displays as `global` or `<kind>_<n>`, e.g. `function_1`, `block_3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId {
    pub kind: ScopeKind,
    pub ordinal: usize,
}

impl ScopeId {
    pub const GLOBAL: ScopeId = ScopeId {
        kind: ScopeKind::Global,
        ordinal: 0,
    };

    pub fn new(kind: ScopeKind, ordinal: usize) -> Self {
        Self { kind, ordinal }
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ScopeKind::Global => f.write_str("global"),
            kind => write!(f, "{}_{}", kind.as_str(), self.ordinal),
        }
    }
}

/// A named entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub reference_count: usize,
    /// Byte offset of the declaring identifier
    pub declared_at: usize,
    pub scope: ScopeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Function,
}

impl SymbolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Function => "function",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_lookup() {
        let mut table = SymbolTable::new();
        let outer = table.declare("x", SymbolKind::Variable, 0).unwrap();

        let inner_scope = table.enter_scope(ScopeKind::Function);
        assert_eq!(table.lookup("x"), Some(outer));
        assert_eq!(table.lookup_local("x"), None);

        let inner = table.declare("x", SymbolKind::Parameter, 10).unwrap();
        assert_eq!(table.lookup("x"), Some(inner));
        assert_eq!(table.get(inner).map(|s| s.scope), Some(inner_scope));

        assert_eq!(table.exit_scope(), inner_scope);
        assert_eq!(table.lookup("x"), Some(outer));
        assert_eq!(table.lookup("y"), None);
    }

    #[test]
    fn test_duplicate_declaration_keeps_first() {
        let mut table = SymbolTable::new();
        let first = table.declare("x", SymbolKind::Variable, 0).unwrap();
        let err = table.declare("x", SymbolKind::Function, 5).unwrap_err();
        assert_eq!(err.existing, first);
        assert_eq!(err.scope, ScopeId::GLOBAL);
        assert_eq!(table.get(first).map(|s| s.kind), Some(SymbolKind::Variable));
        assert_eq!(table.symbols_in(ScopeId::GLOBAL).len(), 1);
    }

    #[test]
    fn test_scope_ids_are_unique_and_displayed_by_kind() {
        let mut table = SymbolTable::new();
        let f = table.enter_scope(ScopeKind::Function);
        let b = table.enter_scope(ScopeKind::Block);
        table.exit_scope();
        table.exit_scope();
        let a = table.enter_scope(ScopeKind::Arrow);

        assert_eq!(ScopeId::GLOBAL.to_string(), "global");
        assert_eq!(f.to_string(), "function_1");
        assert_eq!(b.to_string(), "block_2");
        assert_eq!(a.to_string(), "arrow_3");
        assert_eq!(table.scope(b).and_then(|s| s.parent), Some(f));
    }

    #[test]
    fn test_exit_global_is_noop() {
        let mut table = SymbolTable::new();
        assert_eq!(table.exit_scope(), ScopeId::GLOBAL);
        assert_eq!(table.current_scope(), ScopeId::GLOBAL);
    }

    #[test]
    fn test_symbols_in_declaration_order() {
        let mut table = SymbolTable::new();
        for (i, name) in ["c", "a", "b"].iter().enumerate() {
            table.declare(name, SymbolKind::Variable, i).unwrap();
        }
        let names: Vec<_> = table.symbols_in(ScopeId::GLOBAL).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_add_reference() {
        let mut table = SymbolTable::new();
        let id = table.declare("x", SymbolKind::Variable, 0).unwrap();
        table.add_reference(id);
        table.add_reference(id);
        assert_eq!(table.get(id).map(|s| s.reference_count), Some(2));
    }
}
