//! Identifier interning.
//!
//! `cog` source files tend to repeat the same handful of identifiers
//! (parameter names, struct fields, the package name) many times over.
//! [`Interner`] gives every distinct spelling a stable, cheaply
//! comparable [`Symbol`] handle. The compiler is single-threaded
//! (see the crate-level concurrency notes in `cogc-drv`), so unlike a
//! lock-free global table this is just a plain growable vector owned
//! by whichever pass is running.

use rustc_hash::FxHashMap;
use std::fmt;

/// A handle to an interned string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Owns the backing strings for every [`Symbol`] handed out.
#[derive(Default)]
pub struct Interner {
    strings: Vec<String>,
    lookup: FxHashMap<String, Symbol>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `text`, returning the existing symbol if seen before.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(sym) = self.lookup.get(text) {
            return *sym;
        }
        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(text.to_owned());
        self.lookup.insert(text.to_owned(), sym);
        sym
    }

    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_spellings_share_a_symbol() {
        let mut interner = Interner::new();
        let a = interner.intern("val");
        let b = interner.intern("val");
        let c = interner.intern("other");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "val");
    }
}
