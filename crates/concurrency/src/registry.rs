//! Per-ISBN lock registry
//!
//! One read/write lock per catalog key, created lazily on first reference.
//! The table itself is a DashMap, so concurrent first references to the same
//! new key race through a single `entry` call and always observe one lock
//! instance, never two.
//!
//! Entries are removed only together with their catalog entry (targeted
//! removal under the catalog-wide exclusive lock) or in bulk on
//! whole-catalog reset. A guard holds an `Arc` to its lock, so removal while
//! a guard is live cannot invalidate the guard.

use dashmap::DashMap;
use folio_core::Isbn;
use parking_lot::{ArcRwLockReadGuard, ArcRwLockWriteGuard, RawRwLock, RwLock};
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::sync::Arc;

type ItemLock = Arc<RwLock<()>>;
type FxDashMap<K, V> = DashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Scoped shared (read) hold on one key's lock.
///
/// The lock is released when the guard drops; there is no other way to
/// release it, so a release without a matching acquire cannot be written.
pub struct SharedGuard {
    isbn: Isbn,
    _guard: ArcRwLockReadGuard<RawRwLock, ()>,
}

impl SharedGuard {
    /// The key this guard holds.
    pub fn isbn(&self) -> Isbn {
        self.isbn
    }
}

/// Scoped exclusive (write) hold on one key's lock.
pub struct ExclusiveGuard {
    isbn: Isbn,
    _guard: ArcRwLockWriteGuard<RawRwLock, ()>,
}

impl ExclusiveGuard {
    /// The key this guard holds.
    pub fn isbn(&self) -> Isbn {
        self.isbn
    }
}

/// Concurrent table of per-key read/write locks.
pub struct LockRegistry {
    locks: FxDashMap<Isbn, ItemLock>,
}

impl LockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        LockRegistry {
            locks: FxDashMap::default(),
        }
    }

    /// Acquire the key's lock in shared mode, creating it on first
    /// reference. Blocks while an exclusive holder is present.
    pub fn acquire_shared(&self, isbn: Isbn) -> SharedGuard {
        let lock = self.lock_for(isbn);
        SharedGuard {
            isbn,
            _guard: lock.read_arc(),
        }
    }

    /// Acquire the key's lock in exclusive mode, creating it on first
    /// reference. Blocks while any other holder is present.
    pub fn acquire_exclusive(&self, isbn: Isbn) -> ExclusiveGuard {
        let lock = self.lock_for(isbn);
        ExclusiveGuard {
            isbn,
            _guard: lock.write_arc(),
        }
    }

    /// Create the key's lock without acquiring it. Used when a new catalog
    /// entry and its registry entry are installed together.
    pub fn register(&self, isbn: Isbn) {
        self.lock_for(isbn);
    }

    /// Remove one key's lock, together with its catalog entry. Live guards
    /// keep the lock itself alive through their `Arc`.
    pub fn remove(&self, isbn: Isbn) -> bool {
        self.locks.remove(&isbn).is_some()
    }

    /// Whether the registry has a lock for this key.
    pub fn contains(&self, isbn: Isbn) -> bool {
        self.locks.contains_key(&isbn)
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Bulk-clear every entry. Whole-catalog reset only.
    pub fn clear(&self) {
        self.locks.clear();
    }

    // Atomic create-if-absent: the entry call locks only the key's shard,
    // and the shard lock is dropped before the returned lock is waited on.
    fn lock_for(&self, isbn: Isbn) -> ItemLock {
        self.locks
            .entry(isbn)
            .or_insert_with(|| Arc::new(RwLock::new(())))
            .clone()
    }
}

impl Default for LockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockRegistry")
            .field("keys", &self.len())
            .finish()
    }
}
