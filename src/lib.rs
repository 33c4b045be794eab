//! # Folio
//!
//! Concurrent in-memory book catalog with two-level locking.
//!
//! Folio keeps a catalog of books keyed by ISBN and exposes it through two
//! roles: the client-facing [`BookStoreOps`] (purchases, ratings, queries)
//! and the stock-management [`StockManagerOps`] (adding, removing, and
//! restocking entries). A single [`Bookstore`] handle implements both and is
//! safe to share across threads.
//!
//! ## Quick start
//!
//! ```ignore
//! use foliodb::prelude::*;
//!
//! let store = Bookstore::new();
//!
//! store.add_books(&[StockBook::new(Isbn::new(3044560), "Title", "Author", 10.0, 5)])?;
//! store.buy_books(&[BookCopy::new(Isbn::new(3044560), 2)])?;
//!
//! let books = store.get_all_books()?;
//! assert_eq!(books[0].num_copies, 3);
//! ```
//!
//! ## Locking strategies
//!
//! Two interchangeable engines back the handle, selected at construction:
//!
//! - [`LockingStrategy::TwoLevel`] (default): a catalog-wide lock classifies
//!   operations as structural (exclusive) or content-level (shared),
//!   composed with per-ISBN locks; content-level work on distinct keys runs
//!   fully concurrently.
//! - [`LockingStrategy::SingleLock`]: the baseline, one lock around
//!   everything, for comparison under contention.
//!
//! ```ignore
//! let store = Bookstore::builder()
//!     .strategy(LockingStrategy::SingleLock)
//!     .build();
//! ```

#![warn(missing_docs)]

mod store;

pub mod prelude;

pub use store::{Bookstore, BookstoreBuilder, LockingStrategy};

// Re-export the operation traits and core vocabulary
pub use folio_core::{
    validate, Book, BookCopy, BookRating, EditorPick, Error, Isbn, Result, Shortfall, StockBook,
};
pub use folio_engine::{
    BookStoreOps, CatalogStore, SingleLockBookStore, StockManagerOps, TwoLevelBookStore,
};
