//! Statement nodes.

use crate::expr::Expr;
use crate::ident::Ident;
use crate::ty::{ProcSig, Ty};
use cogc_util::{Position, Symbol};

/// One `case` arm of a switch statement.
#[derive(Clone, Debug)]
pub struct SwitchCase {
    pub values: Vec<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Clone, Debug)]
pub enum StmtKind {
    Package(Symbol),
    /// `goimport ( "string"* )`
    GoImport(Vec<String>),
    /// `x := e`, `x : T = e`, or `x : T` (no initialiser).
    Declaration {
        ident: Ident,
        value: Option<Expr>,
    },
    /// `target = value` — never introduces a binding.
    Assignment {
        target: Expr,
        value: Expr,
    },
    Block(Vec<Stmt>),
    ExprStmt(Expr),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// Tag switch when `tag` is `Some`, boolean switch otherwise.
    Switch {
        tag: Option<Expr>,
        cases: Vec<SwitchCase>,
        default: Option<Box<Stmt>>,
    },
    /// `Name ~ <type expression>` — alias or enum declaration.
    TypeDecl {
        name: Symbol,
        ty: Ty,
    },
    Return(Vec<Expr>),
    Break {
        label: Option<Symbol>,
    },
    Label {
        name: Symbol,
        stmt: Box<Stmt>,
    },
    ProcDecl {
        ident: Ident,
        sig: ProcSig,
        body: Box<Stmt>,
    },
}

#[derive(Clone, Debug)]
pub struct Stmt {
    pub kind: Box<StmtKind>,
    pub position: Position,
}

impl Stmt {
    pub fn new(kind: StmtKind, position: Position) -> Self {
        Self {
            kind: Box::new(kind),
            position,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }
}
