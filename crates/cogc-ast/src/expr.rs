//! Expression nodes.

use crate::ty::{Basic, Ty};
use cogc_util::{Position, Symbol};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrefixOp {
    Not,
    Neg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

/// A field in a `{ name = value }` struct literal.
#[derive(Clone, Debug)]
pub struct StructFieldInit {
    pub name: Symbol,
    pub value: Expr,
}

/// A `key: value` entry in a map literal.
#[derive(Clone, Debug)]
pub struct MapEntry {
    pub key: Expr,
    pub value: Expr,
}

#[derive(Clone, Debug)]
pub enum ExprKind {
    Identifier(Symbol),
    Selector {
        base: Box<Expr>,
        field: Symbol,
    },
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Prefix {
        op: PrefixOp,
        operand: Box<Expr>,
    },
    Infix {
        op: InfixOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// The `?` option-unwrap suffix.
    OptionUnwrap {
        operand: Box<Expr>,
    },
    Grouped(Box<Expr>),

    BoolLit(bool),
    IntLit {
        value: i128,
        width: Basic,
    },
    FloatLit {
        value: f64,
        width: Basic,
    },
    StringLit {
        value: String,
        kind: Basic,
    },

    ArrayLit(Vec<Expr>),
    SliceLit(Vec<Expr>),
    SetLit(Vec<Expr>),
    MapLit(Vec<MapEntry>),
    StructLit(Vec<StructFieldInit>),
    TupleLit(Vec<Expr>),
    /// A union literal tags which arm was constructed; `is_or` mirrors
    /// the lowered record's `Tag` field.
    UnionLit {
        is_or: bool,
        value: Box<Expr>,
    },
    /// `{ … }` parsed with an expected procedure/function type.
    ProcedureLit {
        sig: Box<Ty>,
        body: Box<crate::stmt::Stmt>,
    },

    Builtin {
        name: Symbol,
        args: Vec<Expr>,
    },
    GoCall {
        pkg: Symbol,
        func: Symbol,
        args: Vec<Expr>,
    },
}

#[derive(Clone, Debug)]
pub struct Expr {
    pub kind: Box<ExprKind>,
    pub position: Position,
    pub ty: Ty,
}

impl Expr {
    pub fn new(kind: ExprKind, position: Position, ty: Ty) -> Self {
        Self {
            kind: Box::new(kind),
            position,
            ty,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }
}
