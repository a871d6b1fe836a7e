//! The transpiler-side symbol table.
//!
//! Mirrors the parser's `SymbolTable` in spirit but serves a different
//! purpose: every top-level binding is pre-declared as a TL identifier
//! whose text starts out as `"_"`, then gets promoted to its real,
//! exported-aware name the first time something actually references it.
//! TL rejects unused locals; this trick keeps a `cog` declaration that
//! nothing reads from breaking the emitted build.

use cogc_util::Symbol;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug)]
pub struct Slot(Rc<RefCell<String>>);

impl Slot {
    /// Called the first time this binding is actually referenced;
    /// subsequent reads (including the original `Var`/`Func` decl,
    /// printed after the tree is fully built) see the real name.
    pub fn resolve(&self, real_name: &str) {
        *self.0.borrow_mut() = real_name.to_string();
    }

    pub fn text(&self) -> String {
        self.0.borrow().clone()
    }
}

pub struct TlSymbols {
    slots: FxHashMap<Symbol, Slot>,
}

impl TlSymbols {
    pub fn new() -> Self {
        Self { slots: FxHashMap::default() }
    }

    /// Reserves a placeholder slot for `name`, starting as `"_"`.
    pub fn declare(&mut self, name: Symbol) -> Slot {
        let slot = Slot(Rc::new(RefCell::new("_".to_string())));
        self.slots.insert(name, slot.clone());
        slot
    }

    /// Marks `name` as used, promoting it to `real_name` if this is the
    /// first use, and returns the name callers should print.
    pub fn use_name(&mut self, name: Symbol, real_name: &str) -> String {
        match self.slots.get(&name) {
            Some(slot) => {
                if slot.text() == "_" {
                    slot.resolve(real_name);
                }
                slot.text()
            }
            None => real_name.to_string(),
        }
    }

    pub fn slot(&self, name: Symbol) -> Option<&Slot> {
        self.slots.get(&name)
    }
}
