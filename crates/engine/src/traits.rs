//! The catalog operation set
//!
//! Two roles over one catalog: [`BookStoreOps`] is the client-facing
//! content/query interface, [`StockManagerOps`] the stock-management
//! interface. [`CatalogStore`] is the combined capability a store
//! implementation provides; which implementation backs it is chosen at
//! construction.
//!
//! Every operation is all-or-nothing per call: any invalid element aborts
//! the whole call with no observable side effects, except the documented
//! demand-counter side effect of a failed purchase
//! ([`Error::InsufficientStock`](folio_core::Error::InsufficientStock)).

use folio_core::{Book, BookCopy, BookRating, EditorPick, Isbn, Result, StockBook};

/// Client-facing operations: purchases, ratings, and read queries.
pub trait BookStoreOps: Send + Sync {
    /// Buy copies of the given books.
    ///
    /// If any requested item has insufficient stock, the call records every
    /// item's shortfall in its demand counter and fails without selling
    /// anything. Only a call with no shortfalls decrements stock.
    fn buy_books(&self, orders: &[BookCopy]) -> Result<()>;

    /// Apply one rating per entry to the named books.
    fn rate_books(&self, ratings: &[BookRating]) -> Result<()>;

    /// Snapshots of the named books.
    fn get_books(&self, isbns: &[Isbn]) -> Result<Vec<Book>>;

    /// Up to `count` editor picks, chosen uniformly at random without
    /// replacement; all of them if there are no more than `count`.
    /// Order is unspecified.
    fn get_editor_picks(&self, count: usize) -> Result<Vec<Book>>;

    /// The `count` best-rated books: rated entries ranked by average rating
    /// descending, ties broken by ascending ISBN. Unrated entries never
    /// appear.
    fn get_top_rated_books(&self, count: usize) -> Result<Vec<Book>>;
}

/// Stock-management operations: structural changes and stock bookkeeping.
pub trait StockManagerOps: Send + Sync {
    /// Add new entries to the catalog. Rejects the whole call if any entry
    /// is malformed or its ISBN already exists.
    fn add_books(&self, books: &[StockBook]) -> Result<()>;

    /// Add copies to existing entries.
    fn add_copies(&self, copies: &[BookCopy]) -> Result<()>;

    /// Full snapshots of every entry in the catalog.
    fn get_all_books(&self) -> Result<Vec<StockBook>>;

    /// Full snapshots of the named entries.
    fn get_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>>;

    /// Full snapshots of every entry whose demand counter is positive.
    fn get_books_in_demand(&self) -> Result<Vec<StockBook>>;

    /// Set the editor-pick flag on the named entries. Readers observe the
    /// whole batch flipped or none of it.
    fn update_editor_picks(&self, picks: &[EditorPick]) -> Result<()>;

    /// Remove the named entries, and their locks, from the catalog.
    fn remove_books(&self, isbns: &[Isbn]) -> Result<()>;

    /// Reset the catalog: every entry and every per-key lock.
    fn remove_all_books(&self) -> Result<()>;
}

/// The full capability set of a catalog store implementation.
pub trait CatalogStore: BookStoreOps + StockManagerOps {}

impl<T: BookStoreOps + StockManagerOps> CatalogStore for T {}
