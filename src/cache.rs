//! Per-instance caching for derived values
//!
//! Entities built from a raw API response expose collections that are
//! computed from the raw rows on first access. `Derived` holds such a
//! value: the computation runs at most once per entity instance, and the
//! cell is discarded together with the entity. There is no explicit
//! invalidation; a fresh entity starts with an empty cell.

use once_cell::sync::OnceCell;
use std::fmt;

/// A lazily computed, per-instance derived value.
///
/// The stored value keeps a stable identity for the lifetime of the owning
/// entity, even when the computation would allocate a fresh collection on
/// every run. Concurrent first accesses block on the winning computation.
pub struct Derived<T>(OnceCell<T>);

impl<T> Derived<T> {
    /// Create an empty cell
    pub const fn new() -> Self {
        Self(OnceCell::new())
    }

    /// Return the cached value, computing and storing it on first access.
    ///
    /// The computation must be free of observable side effects; it is
    /// skipped entirely on every access after the first.
    pub fn get_or_compute(&self, compute: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(compute)
    }

    /// Return the cached value without computing it
    pub fn get(&self) -> Option<&T> {
        self.0.get()
    }

    /// Whether the value has been computed yet
    pub fn is_computed(&self) -> bool {
        self.0.get().is_some()
    }
}

impl<T> Default for Derived<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Derived<T> {
    fn clone(&self) -> Self {
        match self.0.get() {
            Some(value) => Self(OnceCell::with_value(value.clone())),
            None => Self::new(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.get() {
            Some(value) => f.debug_tuple("Derived").field(value).finish(),
            None => f.write_str("Derived(<uncomputed>)"),
        }
    }
}
