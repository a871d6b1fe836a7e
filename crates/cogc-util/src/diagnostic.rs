//! Accumulating diagnostics.
//!
//! The lexer, parser, and transpiler never abort the whole compile on
//! the first problem found (see spec §7 in the project notes): each
//! records a [`Diagnostic`] into a [`Bag`] and keeps going where it
//! can. The CLI joins the bag into newline-separated, position-prefixed
//! text on the way out.

use crate::span::Position;
use std::fmt;

/// A single reported problem, tagged with the production that raised it.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub position: Position,
    pub stage: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn new(position: Position, stage: &'static str, message: impl Into<String>) -> Self {
        Self {
            position,
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.position, self.stage, self.message)
    }
}

/// A growable collection of diagnostics produced by one compiler pass.
#[derive(Default, Debug, Clone)]
pub struct Bag {
    diagnostics: Vec<Diagnostic>,
}

impl Bag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, position: Position, stage: &'static str, message: impl Into<String>) {
        self.push(Diagnostic::new(position, stage, message));
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn extend(&mut self, other: Bag) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Joins every diagnostic into the newline-separated report the CLI
    /// prints to stderr, or `None` if nothing was recorded.
    pub fn join(&self) -> Option<String> {
        if self.diagnostics.is_empty() {
            return None;
        }
        Some(
            self.diagnostics
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}
