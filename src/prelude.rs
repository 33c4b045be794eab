//! Convenient imports for Folio.
//!
//! ```ignore
//! use foliodb::prelude::*;
//!
//! let store = Bookstore::new();
//! store.add_books(&[StockBook::new(Isbn::new(1), "Title", "Author", 10.0, 5)])?;
//! ```

// Main entry point
pub use crate::store::{Bookstore, BookstoreBuilder, LockingStrategy};

// Operation traits
pub use folio_engine::{BookStoreOps, CatalogStore, StockManagerOps};

// Error handling
pub use folio_core::{Error, Result, Shortfall};

// Domain types
pub use folio_core::{Book, BookCopy, BookRating, EditorPick, Isbn, StockBook};
