//! Recompute-on-read memo cells.
//!
//! A [`Memo`] caches one derived value together with the key it was computed
//! from. Reading with an equal key returns the cached value; any other key
//! recomputes and replaces it. Keys are built from dataset revisions and the
//! upstream values a derivation reads, so a cell recomputes exactly when one
//! of its inputs changed since the last read.
//!
//! Cells use interior mutability and are not `Sync`.

use std::cell::{Cell, RefCell};

pub struct Memo<K, V> {
    slot: RefCell<Option<(K, V)>>,
    computations: Cell<u64>,
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(None),
            computations: Cell::new(0),
        }
    }

    /// Returns the value cached for `key`, computing it first if needed.
    ///
    /// `compute` may read other cells but must not read this one.
    pub fn get(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some((cached_key, value)) = self.slot.borrow().as_ref() {
            if *cached_key == key {
                return value.clone();
            }
        }

        let value = compute();
        self.computations.set(self.computations.get() + 1);
        *self.slot.borrow_mut() = Some((key, value.clone()));
        value
    }

    /// How many times this cell has run its computation.
    pub fn computations(&self) -> u64 {
        self.computations.get()
    }
}

impl<K: PartialEq, V: Clone> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> std::fmt::Debug for Memo<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memo")
            .field("cached", &self.slot.borrow().is_some())
            .field("computations", &self.computations.get())
            .finish()
    }
}
