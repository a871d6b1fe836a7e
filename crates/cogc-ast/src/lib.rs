//! cogc-ast - the type-kind lattice and the AST that the parser builds
//! over it.
//!
//! Types live here rather than in a separate crate because every AST
//! node carries one (every expression has an inferred `Ty`, every
//! identifier has a resolved `Ty`) — splitting them would just add a
//! dependency edge back from "types" to "AST".

pub mod expr;
pub mod file;
pub mod ident;
pub mod print;
pub mod stmt;
pub mod ty;

pub use expr::{Expr, ExprKind, InfixOp, MapEntry, PrefixOp, StructFieldInit};
pub use file::File;
pub use ident::{Ident, Qualifier};
pub use stmt::{Stmt, StmtKind, SwitchCase};
pub use ty::{Basic, EnumVariant, Field, GenericConstraint, Param, ProcSig, Ty};

use cogc_util::{content_hash, Interner};

/// Computes an AST node's stable content hash from its position and
/// printed form.
pub fn expr_hash(e: &Expr, interner: &Interner) -> u64 {
    content_hash(e.position, &print::print_expr(e, interner))
}

pub fn stmt_hash(s: &Stmt, interner: &Interner) -> u64 {
    content_hash(s.position, &print::print_stmt(s, interner))
}
