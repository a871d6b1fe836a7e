//! Resolved identifiers.

use crate::ty::Ty;
use cogc_util::{Position, Symbol};

/// How an identifier was bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Qualifier {
    /// `x := e` / `x : T = e` — ordinary immutable binding.
    Immutable,
    /// `var x : T = e` — reassignable binding.
    Variable,
    /// `dyn x : T = e` — package-scope, context-carried binding.
    Dynamic,
    /// A type alias, enum, or struct name.
    Type,
}

/// A resolved identifier: its spelling, declaration site, inferred
/// type, export visibility, and binding qualifier.
#[derive(Clone, Debug)]
pub struct Ident {
    pub name: Symbol,
    pub position: Position,
    pub ty: Ty,
    pub exported: bool,
    pub qualifier: Qualifier,
}

impl Ident {
    pub fn new(name: Symbol, position: Position, ty: Ty, qualifier: Qualifier) -> Self {
        Self {
            name,
            position,
            ty,
            exported: false,
            qualifier,
        }
    }
}
