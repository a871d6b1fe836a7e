//! The parse-produced top-level record.

use crate::stmt::Stmt;
use cogc_util::Symbol;

/// A parsed module: its package name and top-level statements, in
/// source order.
#[derive(Clone, Debug)]
pub struct File {
    pub package: Symbol,
    pub statements: Vec<Stmt>,
}
