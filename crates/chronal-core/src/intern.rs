//! Weak interning of time objects.
//!
//! Calendars hand out the same [`TimeObject`] for the same key while any
//! caller still holds it, so equality checks usually take the pointer fast
//! path. Entries are weak: the interner never keeps an object alive, and
//! dead entries are pruned once the table grows past a threshold.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::object::{TimeObject, WeakTimeObject};

const DEFAULT_PRUNE_AT: usize = 1024;

struct Table<K> {
    entries: HashMap<K, WeakTimeObject>,
    prune_at: usize,
}

/// Key-to-object table holding weak references.
pub struct Interner<K> {
    table: Mutex<Table<K>>,
}

impl<K: Eq + Hash> Interner<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_prune_threshold(DEFAULT_PRUNE_AT)
    }

    /// Prune dead entries whenever the table grows past `threshold`.
    #[must_use]
    pub fn with_prune_threshold(threshold: usize) -> Self {
        Self {
            table: Mutex::new(Table {
                entries: HashMap::new(),
                prune_at: threshold.max(1),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Table<K>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The live object for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<TimeObject> {
        self.lock().entries.get(key).and_then(WeakTimeObject::upgrade)
    }

    /// The live object for `key`, or a new one from `make`.
    ///
    /// `make` runs without the lock held, so it may itself intern (a child
    /// building its parent). If another thread interned the key meanwhile,
    /// that object wins and the freshly made one is dropped.
    ///
    /// # Errors
    ///
    /// Propagates the error from `make`.
    pub fn intern<E>(
        &self,
        key: K,
        make: impl FnOnce() -> Result<TimeObject, E>,
    ) -> Result<TimeObject, E> {
        if let Some(existing) = self.get(&key) {
            return Ok(existing);
        }
        let made = make()?;

        let mut table = self.lock();
        if let Some(existing) = table.entries.get(&key).and_then(WeakTimeObject::upgrade) {
            return Ok(existing);
        }
        table.entries.insert(key, made.downgrade());
        if table.entries.len() > table.prune_at {
            Self::prune_locked(&mut table);
        }
        Ok(made)
    }

    /// Drop entries whose objects are gone. Returns how many were removed.
    pub fn prune(&self) -> usize {
        Self::prune_locked(&mut self.lock())
    }

    fn prune_locked(table: &mut Table<K>) -> usize {
        let before = table.entries.len();
        table.entries.retain(|_, weak| weak.is_live());
        let removed = before - table.entries.len();
        // Keep the threshold at least twice the live count.
        table.prune_at = table.prune_at.max(table.entries.len() * 2);
        debug!(removed, live = table.entries.len(), "pruned interner");
        removed
    }

    /// Number of entries, live or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash> Default for Interner<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Interner<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self
            .table
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().entries.len(), |t| t.entries.len());
        f.debug_struct("Interner").field("entries", &len).finish()
    }
}
