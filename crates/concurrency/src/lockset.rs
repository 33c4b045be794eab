//! Ordered multi-key lock acquisition
//!
//! A call that touches several keys must take their locks in one fixed total
//! order, or two overlapping calls can deadlock by acquiring in opposite
//! orders. Lock sets sort the requested keys ascending and deduplicate them
//! before acquiring anything; the per-key locks are not reentrant, so a
//! duplicate key must map to a single acquisition.
//!
//! The set is also the call's lock-acquisition record: guards are stored in
//! acquisition order and dropped back-to-front, so exactly the locks that
//! were acquired are released, in reverse order, on every exit path.

use crate::registry::{ExclusiveGuard, LockRegistry, SharedGuard};
use folio_core::Isbn;
use smallvec::SmallVec;

fn sorted_unique(keys: &[Isbn]) -> SmallVec<[Isbn; 8]> {
    let mut sorted: SmallVec<[Isbn; 8]> = keys.iter().copied().collect();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}

/// Shared holds on a set of keys, for snapshot reads.
pub struct SharedLockSet {
    guards: SmallVec<[SharedGuard; 8]>,
}

impl SharedLockSet {
    /// Acquire every key's lock in shared mode, ascending ISBN order.
    pub fn acquire(registry: &LockRegistry, keys: &[Isbn]) -> Self {
        let guards = sorted_unique(keys)
            .into_iter()
            .map(|isbn| registry.acquire_shared(isbn))
            .collect();
        SharedLockSet { guards }
    }

    /// The held keys, in acquisition order.
    pub fn keys(&self) -> impl Iterator<Item = Isbn> + '_ {
        self.guards.iter().map(|g| g.isbn())
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Whether the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl Drop for SharedLockSet {
    fn drop(&mut self) {
        // Reverse acquisition order.
        while self.guards.pop().is_some() {}
    }
}

/// Exclusive holds on a set of keys, for content mutation.
pub struct ExclusiveLockSet {
    guards: SmallVec<[ExclusiveGuard; 8]>,
}

impl ExclusiveLockSet {
    /// Acquire every key's lock in exclusive mode, ascending ISBN order.
    pub fn acquire(registry: &LockRegistry, keys: &[Isbn]) -> Self {
        let guards = sorted_unique(keys)
            .into_iter()
            .map(|isbn| registry.acquire_exclusive(isbn))
            .collect();
        ExclusiveLockSet { guards }
    }

    /// The held keys, in acquisition order.
    pub fn keys(&self) -> impl Iterator<Item = Isbn> + '_ {
        self.guards.iter().map(|g| g.isbn())
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Whether the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl Drop for ExclusiveLockSet {
    fn drop(&mut self) {
        while self.guards.pop().is_some() {}
    }
}
