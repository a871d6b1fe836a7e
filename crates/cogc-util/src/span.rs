//! Source position tracking.
//!
//! Every token and AST node carries a [`Position`]: a 1-based line and
//! column pair. Columns are 16-bit because `cog` treats pathologically
//! wide lines as a lexical error rather than a thing to track precisely.

use std::fmt;

/// A 1-based line/column coordinate into a single source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u16,
}

impl Position {
    pub const fn new(line: u32, column: u16) -> Self {
        Self { line, column }
    }

    /// Position of the first character of a file.
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ln {}, col {}", self.line, self.column)
    }
}
