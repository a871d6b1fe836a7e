//! cogc-sem - the scoped symbol table shared by the parser and the
//! transpiler.
//!
//! Type checking itself happens inline in `cogc-par` as it walks the
//! token stream; this crate only owns the name-resolution structure
//! both the parser and the transpiler need: a scope tree plus the
//! flat maps for struct fields, enum constants, and go-imports that
//! sit outside ordinary lexical scoping.

pub mod scope;

pub use scope::{ScopeGuard, ScopeId, ScopeTag, SymbolEntry, SymbolKind, SymbolTable};
