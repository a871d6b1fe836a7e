//! Scope tree.
//!
//! Each scope is a flat map plus a back-pointer to its outer scope.
//! Back-pointers never change once written, so pushing a new scope
//! onto the end of the arena can never invalidate a previously
//! handed-out [`ScopeId`].

use cogc_util::Symbol;
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScopeId(pub usize);

/// What a scope was opened for. Only `Global` may host `dyn`
/// declarations, `export` statements, type declarations, and
/// procedure declarations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeTag {
    /// Root package scope.
    Global,
    /// Pass-1 global-discovery placeholder, later promoted to
    /// `Global` once the full parse reaches the same declaration.
    Scan,
    /// A block or parameter list nested under package scope.
    Local,
    StructFields,
    EnumValues,
    GoImport,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Constant,
    Type,
    Field,
}

#[derive(Clone, Debug)]
pub struct SymbolEntry<I> {
    pub ident: I,
    pub scope_tag: ScopeTag,
    pub kind: SymbolKind,
}

struct Scope<I> {
    symbols: FxHashMap<Symbol, SymbolEntry<I>>,
    outer: Option<ScopeId>,
}

/// A tree of scopes, generic over the identifier payload each entry
/// carries (the parser's table stores `cogc_ast::Ident`; the
/// transpiler's stores a plain TL name string).
pub struct SymbolTable<I> {
    scopes: Vec<Scope<I>>,
    current: ScopeId,
    /// Struct fields and enum constants, keyed by `(owner, field)` so
    /// `Name.Variant` resolves the same way regardless of which one
    /// it is. Lives outside the scope tree because struct and enum
    /// names are only ever declared at package scope — no shadowing
    /// to walk through.
    fields: FxHashMap<(Symbol, Symbol), SymbolEntry<I>>,
    /// Go-import names are promoted to the root so `@go.x.y` resolves
    /// from any nested scope.
    go_imports: FxHashMap<Symbol, I>,
}

impl<I: Clone> SymbolTable<I> {
    pub const ROOT: ScopeId = ScopeId(0);

    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                symbols: FxHashMap::default(),
                outer: None,
            }],
            current: Self::ROOT,
            fields: FxHashMap::default(),
            go_imports: FxHashMap::default(),
        }
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    pub fn is_root(&self, id: ScopeId) -> bool {
        id == Self::ROOT
    }

    /// Pushes a new scope under the current one and makes it current.
    /// Callers must restore the returned guard on every exit path,
    /// including error returns; letting it drop does that
    /// automatically.
    pub fn enter_scope(&mut self) -> ScopeGuard {
        let parent = self.current;
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            symbols: FxHashMap::default(),
            outer: Some(parent),
        });
        self.current = id;
        ScopeGuard { parent }
    }

    fn restore(&mut self, parent: ScopeId) {
        self.current = parent;
    }

    /// Registers `ident` in the current scope. A prior entry is only
    /// overwritten if it came from the pass-1 `Scan` pre-registration;
    /// otherwise this is a redeclaration error.
    pub fn define(&mut self, name: Symbol, ident: I, kind: SymbolKind) -> Result<(), ()> {
        let tag = if self.is_root(self.current) {
            ScopeTag::Global
        } else {
            ScopeTag::Local
        };
        let scope = &mut self.scopes[self.current.0];
        if let Some(existing) = scope.symbols.get(&name) {
            if existing.scope_tag != ScopeTag::Scan {
                return Err(());
            }
        }
        scope.symbols.insert(name, SymbolEntry { ident, scope_tag: tag, kind });
        Ok(())
    }

    /// Pre-registers a pass-1 global-discovery placeholder.
    pub fn define_scan(&mut self, name: Symbol, ident: I, kind: SymbolKind) -> Result<(), ()> {
        let scope = &mut self.scopes[Self::ROOT.0];
        if scope.symbols.contains_key(&name) {
            return Err(());
        }
        scope.symbols.insert(
            name,
            SymbolEntry { ident, scope_tag: ScopeTag::Scan, kind },
        );
        Ok(())
    }

    /// Registers in root scope regardless of current depth.
    pub fn define_global(&mut self, name: Symbol, ident: I, kind: SymbolKind) {
        self.scopes[Self::ROOT.0]
            .symbols
            .insert(name, SymbolEntry { ident, scope_tag: ScopeTag::Global, kind });
    }

    pub fn define_field(&mut self, owner: Symbol, field: Symbol, ident: I) {
        self.fields.insert(
            (owner, field),
            SymbolEntry { ident, scope_tag: ScopeTag::StructFields, kind: SymbolKind::Field },
        );
    }

    pub fn define_enum_value(&mut self, owner: Symbol, field: Symbol, ident: I) {
        self.fields.insert(
            (owner, field),
            SymbolEntry { ident, scope_tag: ScopeTag::EnumValues, kind: SymbolKind::Constant },
        );
    }

    pub fn define_go_import(&mut self, name: Symbol, ident: I) {
        self.go_imports.insert(name, ident);
    }

    /// Walks outer scopes looking for `name`.
    pub fn resolve(&self, name: Symbol) -> Option<&SymbolEntry<I>> {
        let mut scope_id = Some(self.current);
        while let Some(id) = scope_id {
            let scope = &self.scopes[id.0];
            if let Some(entry) = scope.symbols.get(&name) {
                return Some(entry);
            }
            scope_id = scope.outer;
        }
        None
    }

    pub fn resolve_field(&self, owner: Symbol, field: Symbol) -> Option<&SymbolEntry<I>> {
        self.fields.get(&(owner, field))
    }

    pub fn resolve_go_import(&self, name: Symbol) -> Option<&I> {
        self.go_imports.get(&name)
    }
}

impl<I: Clone> Default for SymbolTable<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores the enclosing scope on drop, so leaving a production via
/// an early `return` (common in the parser's error-recovery paths)
/// can never leak a scope.
#[must_use]
pub struct ScopeGuard {
    parent: ScopeId,
}

impl ScopeGuard {
    /// Exits using the table that produced this guard.
    pub fn exit<I: Clone>(self, table: &mut SymbolTable<I>) {
        table.restore(self.parent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogc_util::Interner;

    #[test]
    fn block_exit_restores_outer_scope() {
        let mut interner = Interner::new();
        let mut table: SymbolTable<()> = SymbolTable::new();
        let before = table.current();
        let x = interner.intern("x");
        table.define(x, (), SymbolKind::Variable).unwrap();

        let guard = table.enter_scope();
        assert_ne!(table.current(), before);
        guard.exit(&mut table);

        assert_eq!(table.current(), before);
        assert!(table.resolve(x).is_some());
    }

    #[test]
    fn scan_placeholder_can_be_promoted() {
        let mut interner = Interner::new();
        let mut table: SymbolTable<&str> = SymbolTable::new();
        let a = interner.intern("a");
        table.define_scan(a, "placeholder", SymbolKind::Variable).unwrap();
        table.define(a, "real", SymbolKind::Variable).unwrap();
        assert_eq!(table.resolve(a).unwrap().ident, "real");
    }

    #[test]
    fn redeclaration_of_non_scan_symbol_is_rejected() {
        let mut interner = Interner::new();
        let mut table: SymbolTable<()> = SymbolTable::new();
        let a = interner.intern("a");
        table.define(a, (), SymbolKind::Variable).unwrap();
        assert!(table.define(a, (), SymbolKind::Variable).is_err());
    }

    #[test]
    fn nested_scope_does_not_see_inner_sibling_bindings() {
        let mut interner = Interner::new();
        let mut table: SymbolTable<()> = SymbolTable::new();
        let inner_only = interner.intern("inner_only");

        let guard = table.enter_scope();
        table.define(inner_only, (), SymbolKind::Variable).unwrap();
        guard.exit(&mut table);

        assert!(table.resolve(inner_only).is_none());
    }

    #[test]
    fn go_imports_resolve_regardless_of_current_depth() {
        let mut interner = Interner::new();
        let mut table: SymbolTable<()> = SymbolTable::new();
        let fmt = interner.intern("fmt");
        table.define_go_import(fmt, ());

        let guard = table.enter_scope();
        assert!(table.resolve_go_import(fmt).is_some());
        guard.exit(&mut table);
    }
}
