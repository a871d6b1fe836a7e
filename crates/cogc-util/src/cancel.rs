//! Cooperative cancellation.
//!
//! The compiler is single-threaded; there is no background thread that
//! flips this flag today. It exists because every long-running loop in
//! the parser (expression lists, block bodies, bracket-balanced
//! skipping) is specified to check a cancellation handle at its head
//! and unwind with a partial result rather than spin — a `CancelToken`
//! is how a future embedder (a REPL with a "stop" key, a language
//! server cancelling a stale parse) plugs into that without the loops
//! themselves changing.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(false)))
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelling_one_handle_is_visible_through_a_clone() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
