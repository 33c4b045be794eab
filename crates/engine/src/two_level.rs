//! Two-level locking catalog store
//!
//! Every public operation is classified up front:
//!
//! - **structural** (`add_books`, `remove_books`, `remove_all_books`,
//!   `update_editor_picks`): changes the set of keys or a catalog-wide
//!   derived view; takes the catalog-wide gate exclusively, so it is totally
//!   ordered against everything else.
//! - **content-level** (stock changes, purchases, ratings, all reads):
//!   touches only fields of existing entries; takes the gate in shared mode
//!   plus per-key locks from the registry, exclusive for mutation, shared
//!   for reads. Calls on disjoint key sets run fully concurrently.
//!
//! Lock order is fixed: gate first, then per-key locks in ascending ISBN
//! order (the lock sets enforce this), then at most one short-lived catalog
//! shard lock at a time. Release is structural: guards drop in reverse
//! acquisition order on every exit path.
//!
//! Validation runs before any per-key lock is taken; existence is re-checked
//! after exclusive per-key acquisition. Holding the gate in shared mode
//! already excludes removal, so the re-check cannot fire unless the protocol
//! is broken elsewhere, in which case it fails the call instead of
//! corrupting state.

use crate::record::BookRecord;
use crate::select;
use crate::traits::{BookStoreOps, StockManagerOps};
use dashmap::DashMap;
use folio_concurrency::{ExclusiveLockSet, LockRegistry, SharedLockSet};
use folio_core::{
    validate, Book, BookCopy, BookRating, EditorPick, Error, Isbn, Result, Shortfall, StockBook,
};
use parking_lot::RwLock;
use rustc_hash::FxHashSet;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use tracing::{debug, trace};

type FxDashMap<K, V> = DashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Catalog store with a catalog-wide gate composed with per-ISBN locks.
pub struct TwoLevelBookStore {
    /// The catalog-wide lock: exclusive for structural operations, shared
    /// for content-level ones.
    gate: RwLock<()>,

    /// Catalog State. The shard locks inside the map only guard map access;
    /// record *content* is protected by the registry's per-key locks, and a
    /// shard lock is never held while waiting on any other lock.
    catalog: FxDashMap<Isbn, BookRecord>,

    /// Item Lock Registry. An entry exists here iff the key exists in the
    /// catalog, once the key has been observed; the two are installed and
    /// removed together under the exclusive gate.
    registry: LockRegistry,
}

impl TwoLevelBookStore {
    /// Create an empty store.
    pub fn new() -> Self {
        TwoLevelBookStore {
            gate: RwLock::new(()),
            catalog: FxDashMap::default(),
            registry: LockRegistry::new(),
        }
    }

    /// Number of entries in the catalog.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    // ------------------------------------------------------------------
    // Validation (called with the gate held, before any per-key lock)
    // ------------------------------------------------------------------

    fn validate_in_stock(&self, isbn: Isbn) -> Result<()> {
        validate::validate_isbn(isbn)?;
        if !self.catalog.contains_key(&isbn) {
            return Err(Error::BookNotFound(isbn));
        }
        Ok(())
    }

    fn recheck_present(&self, keys: impl Iterator<Item = Isbn>) -> Result<()> {
        for isbn in keys {
            if !self.catalog.contains_key(&isbn) {
                return Err(Error::BookNotFound(isbn));
            }
        }
        Ok(())
    }

    fn stock_snapshot(&self, isbn: Isbn) -> Result<StockBook> {
        self.catalog
            .get(&isbn)
            .map(|record| record.stock_book())
            .ok_or(Error::BookNotFound(isbn))
    }

    fn all_keys(&self) -> Vec<Isbn> {
        self.catalog.iter().map(|entry| *entry.key()).collect()
    }

    fn keys_where(&self, predicate: impl Fn(&BookRecord) -> bool) -> Vec<Isbn> {
        self.catalog
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| *entry.key())
            .collect()
    }
}

impl Default for TwoLevelBookStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TwoLevelBookStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwoLevelBookStore")
            .field("entries", &self.catalog.len())
            .finish()
    }
}

impl StockManagerOps for TwoLevelBookStore {
    fn add_books(&self, books: &[StockBook]) -> Result<()> {
        if books.is_empty() {
            return Err(Error::EmptyInput("books"));
        }
        trace!(count = books.len(), "add_books");

        let _gate = self.gate.write();

        let mut batch: FxHashSet<Isbn> = FxHashSet::default();
        for book in books {
            validate::validate_new_book(book)?;
            if self.catalog.contains_key(&book.isbn) || !batch.insert(book.isbn) {
                return Err(Error::DuplicateIsbn(book.isbn));
            }
        }

        // Lock-existence and catalog-existence are installed together.
        for book in books {
            self.registry.register(book.isbn);
            self.catalog.insert(book.isbn, BookRecord::new(book));
        }

        debug!(count = books.len(), "catalog entries added");
        Ok(())
    }

    fn add_copies(&self, copies: &[BookCopy]) -> Result<()> {
        if copies.is_empty() {
            return Err(Error::EmptyInput("copies"));
        }
        trace!(count = copies.len(), "add_copies");

        let _gate = self.gate.read();

        for copy in copies {
            self.validate_in_stock(copy.isbn)?;
            if !validate::is_valid_quantity(copy.num_copies) {
                return Err(Error::InvalidQuantity {
                    isbn: copy.isbn,
                    quantity: copy.num_copies,
                });
            }
        }

        let keys: Vec<Isbn> = copies.iter().map(|c| c.isbn).collect();
        let locks = ExclusiveLockSet::acquire(&self.registry, &keys);
        self.recheck_present(locks.keys())?;

        for copy in copies {
            if let Some(mut record) = self.catalog.get_mut(&copy.isbn) {
                record.add_copies(copy.num_copies as u32);
            }
        }
        Ok(())
    }

    fn get_all_books(&self) -> Result<Vec<StockBook>> {
        let _gate = self.gate.read();

        let keys = self.all_keys();
        let locks = SharedLockSet::acquire(&self.registry, &keys);

        locks.keys().map(|isbn| self.stock_snapshot(isbn)).collect()
    }

    fn get_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
        if isbns.is_empty() {
            return Err(Error::EmptyInput("isbns"));
        }

        let _gate = self.gate.read();

        for &isbn in isbns {
            self.validate_in_stock(isbn)?;
        }

        let _locks = SharedLockSet::acquire(&self.registry, isbns);
        isbns.iter().map(|&isbn| self.stock_snapshot(isbn)).collect()
    }

    fn get_books_in_demand(&self) -> Result<Vec<StockBook>> {
        let _gate = self.gate.read();

        let keys = self.all_keys();
        let locks = SharedLockSet::acquire(&self.registry, &keys);

        let mut in_demand = Vec::new();
        for isbn in locks.keys() {
            let snapshot = self.stock_snapshot(isbn)?;
            if snapshot.num_sale_misses > 0 {
                in_demand.push(snapshot);
            }
        }
        Ok(in_demand)
    }

    fn update_editor_picks(&self, picks: &[EditorPick]) -> Result<()> {
        if picks.is_empty() {
            return Err(Error::EmptyInput("picks"));
        }
        trace!(count = picks.len(), "update_editor_picks");

        // Structural: the pick set is a catalog-wide derived view that a
        // concurrent reader must see flip all-or-nothing.
        let _gate = self.gate.write();

        for pick in picks {
            self.validate_in_stock(pick.isbn)?;
        }

        let keys: Vec<Isbn> = picks.iter().map(|p| p.isbn).collect();
        let locks = ExclusiveLockSet::acquire(&self.registry, &keys);
        self.recheck_present(locks.keys())?;

        for pick in picks {
            if let Some(mut record) = self.catalog.get_mut(&pick.isbn) {
                record.set_editor_pick(pick.pick);
            }
        }
        Ok(())
    }

    fn remove_books(&self, isbns: &[Isbn]) -> Result<()> {
        if isbns.is_empty() {
            return Err(Error::EmptyInput("isbns"));
        }
        trace!(count = isbns.len(), "remove_books");

        let _gate = self.gate.write();

        for &isbn in isbns {
            self.validate_in_stock(isbn)?;
        }

        let locks = ExclusiveLockSet::acquire(&self.registry, isbns);

        // Entry and lock are removed together; live guards stay valid
        // through their own handle on the lock.
        for isbn in locks.keys() {
            self.catalog.remove(&isbn);
            self.registry.remove(isbn);
        }

        debug!(count = locks.len(), "catalog entries removed");
        Ok(())
    }

    fn remove_all_books(&self) -> Result<()> {
        let _gate = self.gate.write();
        self.catalog.clear();
        self.registry.clear();
        debug!("catalog reset");
        Ok(())
    }
}

impl BookStoreOps for TwoLevelBookStore {
    fn buy_books(&self, orders: &[BookCopy]) -> Result<()> {
        if orders.is_empty() {
            return Err(Error::EmptyInput("orders"));
        }
        trace!(count = orders.len(), "buy_books");

        let _gate = self.gate.read();

        for order in orders {
            self.validate_in_stock(order.isbn)?;
            if !validate::is_valid_quantity(order.num_copies) {
                return Err(Error::InvalidQuantity {
                    isbn: order.isbn,
                    quantity: order.num_copies,
                });
            }
        }

        let keys: Vec<Isbn> = orders.iter().map(|o| o.isbn).collect();
        let locks = ExclusiveLockSet::acquire(&self.registry, &keys);
        self.recheck_present(locks.keys())?;

        // One pass over the locked items finds *every* shortfall before
        // anything is decided, so a failed call reports them all.
        let mut totals: Vec<(Isbn, u64)> = select::aggregate_quantities(orders).into_iter().collect();
        totals.sort_unstable_by_key(|&(isbn, _)| isbn);

        let mut shortfalls: Vec<Shortfall> = Vec::new();
        for &(isbn, requested) in &totals {
            let record = self.catalog.get(&isbn).ok_or(Error::BookNotFound(isbn))?;
            if !record.copies_in_store(requested) {
                shortfalls.push(Shortfall {
                    isbn,
                    requested,
                    available: u64::from(record.num_copies()),
                });
            }
        }

        if !shortfalls.is_empty() {
            // The purchase is rejected, but the demand signal is kept:
            // every shortfall goes into its item's sale-miss counter.
            for shortfall in &shortfalls {
                if let Some(mut record) = self.catalog.get_mut(&shortfall.isbn) {
                    record.record_sale_miss(shortfall.amount());
                }
            }
            debug!(misses = shortfalls.len(), "purchase rejected on insufficient stock");
            return Err(Error::InsufficientStock { shortfalls });
        }

        for &(isbn, requested) in &totals {
            if let Some(mut record) = self.catalog.get_mut(&isbn) {
                // The stock check bounds each total by a u32 stock level.
                record.sell_copies(requested as u32);
            }
        }
        Ok(())
    }

    fn rate_books(&self, ratings: &[BookRating]) -> Result<()> {
        if ratings.is_empty() {
            return Err(Error::EmptyInput("ratings"));
        }
        trace!(count = ratings.len(), "rate_books");

        let _gate = self.gate.read();

        for rating in ratings {
            self.validate_in_stock(rating.isbn)?;
            if !validate::is_valid_rating(rating.rating) {
                return Err(Error::InvalidRating {
                    isbn: rating.isbn,
                    rating: rating.rating,
                });
            }
        }

        let keys: Vec<Isbn> = ratings.iter().map(|r| r.isbn).collect();
        let locks = ExclusiveLockSet::acquire(&self.registry, &keys);
        self.recheck_present(locks.keys())?;

        for rating in ratings {
            if let Some(mut record) = self.catalog.get_mut(&rating.isbn) {
                record.add_rating(rating.rating);
            }
        }
        Ok(())
    }

    fn get_books(&self, isbns: &[Isbn]) -> Result<Vec<Book>> {
        if isbns.is_empty() {
            return Err(Error::EmptyInput("isbns"));
        }

        let _gate = self.gate.read();

        for &isbn in isbns {
            self.validate_in_stock(isbn)?;
        }

        let _locks = SharedLockSet::acquire(&self.registry, isbns);
        isbns
            .iter()
            .map(|&isbn| {
                self.catalog
                    .get(&isbn)
                    .map(|record| record.book())
                    .ok_or(Error::BookNotFound(isbn))
            })
            .collect()
    }

    fn get_editor_picks(&self, count: usize) -> Result<Vec<Book>> {
        let _gate = self.gate.read();

        // Pick flags only change under the exclusive gate, so the eligible
        // set is stable for the duration of this call.
        let keys = self.keys_where(BookRecord::editor_pick);
        let locks = SharedLockSet::acquire(&self.registry, &keys);

        let mut picks = Vec::with_capacity(locks.len());
        for isbn in locks.keys() {
            let record = self.catalog.get(&isbn).ok_or(Error::BookNotFound(isbn))?;
            picks.push(record.book());
        }
        Ok(select::sample_books(picks, count))
    }

    fn get_top_rated_books(&self, count: usize) -> Result<Vec<Book>> {
        let _gate = self.gate.read();

        let keys = self.keys_where(BookRecord::is_rated);
        let locks = SharedLockSet::acquire(&self.registry, &keys);

        let mut rated = Vec::with_capacity(locks.len());
        for isbn in locks.keys() {
            rated.push(self.stock_snapshot(isbn)?);
        }
        Ok(select::top_rated(rated, count))
    }
}
