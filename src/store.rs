//! The `Bookstore` handle and its builder
//!
//! The handle wraps one of the two engine implementations behind the
//! [`CatalogStore`] capability set and delegates every operation to it.
//! Cloning the handle clones the `Arc`, so one store can be shared across
//! threads without further ceremony.

use folio_core::{Book, BookCopy, BookRating, EditorPick, Isbn, Result, StockBook};
use folio_engine::{
    BookStoreOps, CatalogStore, SingleLockBookStore, StockManagerOps, TwoLevelBookStore,
};
use std::sync::Arc;

/// Which locking protocol backs the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockingStrategy {
    /// Catalog-wide gate plus per-ISBN locks (the default).
    #[default]
    TwoLevel,
    /// One catalog-wide lock around everything; comparison baseline.
    SingleLock,
}

/// A shareable handle on an in-memory catalog store.
#[derive(Clone)]
pub struct Bookstore {
    inner: Arc<dyn CatalogStore>,
}

impl Bookstore {
    /// Create a store with the default (two-level) strategy.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for store configuration.
    pub fn builder() -> BookstoreBuilder {
        BookstoreBuilder::default()
    }

    /// The strategy-agnostic operation surface, for callers that want to
    /// hold a trait object instead of the handle.
    pub fn store(&self) -> &dyn CatalogStore {
        self.inner.as_ref()
    }
}

impl Default for Bookstore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Bookstore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bookstore").finish_non_exhaustive()
    }
}

impl BookStoreOps for Bookstore {
    fn buy_books(&self, orders: &[BookCopy]) -> Result<()> {
        self.inner.buy_books(orders)
    }

    fn rate_books(&self, ratings: &[BookRating]) -> Result<()> {
        self.inner.rate_books(ratings)
    }

    fn get_books(&self, isbns: &[Isbn]) -> Result<Vec<Book>> {
        self.inner.get_books(isbns)
    }

    fn get_editor_picks(&self, count: usize) -> Result<Vec<Book>> {
        self.inner.get_editor_picks(count)
    }

    fn get_top_rated_books(&self, count: usize) -> Result<Vec<Book>> {
        self.inner.get_top_rated_books(count)
    }
}

impl StockManagerOps for Bookstore {
    fn add_books(&self, books: &[StockBook]) -> Result<()> {
        self.inner.add_books(books)
    }

    fn add_copies(&self, copies: &[BookCopy]) -> Result<()> {
        self.inner.add_copies(copies)
    }

    fn get_all_books(&self) -> Result<Vec<StockBook>> {
        self.inner.get_all_books()
    }

    fn get_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
        self.inner.get_books_by_isbn(isbns)
    }

    fn get_books_in_demand(&self) -> Result<Vec<StockBook>> {
        self.inner.get_books_in_demand()
    }

    fn update_editor_picks(&self, picks: &[EditorPick]) -> Result<()> {
        self.inner.update_editor_picks(picks)
    }

    fn remove_books(&self, isbns: &[Isbn]) -> Result<()> {
        self.inner.remove_books(isbns)
    }

    fn remove_all_books(&self) -> Result<()> {
        self.inner.remove_all_books()
    }
}

/// Builder for [`Bookstore`] configuration.
#[derive(Debug, Default)]
pub struct BookstoreBuilder {
    strategy: LockingStrategy,
}

impl BookstoreBuilder {
    /// Select the locking strategy.
    pub fn strategy(mut self, strategy: LockingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Build the store.
    pub fn build(self) -> Bookstore {
        let inner: Arc<dyn CatalogStore> = match self.strategy {
            LockingStrategy::TwoLevel => Arc::new(TwoLevelBookStore::new()),
            LockingStrategy::SingleLock => Arc::new(SingleLockBookStore::new()),
        };
        Bookstore { inner }
    }
}
