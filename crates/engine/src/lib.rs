//! Storage engine for the Folio catalog store
//!
//! Two interchangeable implementations of the catalog operation set:
//!
//! - [`TwoLevelBookStore`]: a catalog-wide read/write lock classifies every
//!   operation as structural (exclusive) or content-level (shared), composed
//!   with per-ISBN locks so content-level work on distinct keys runs fully
//!   concurrently.
//! - [`SingleLockBookStore`]: the baseline, one catalog-wide lock around
//!   everything, exclusive for every mutation.
//!
//! Both are `Send + Sync` and safe to call from any thread without external
//! synchronization. Selection happens at construction, behind the
//! [`CatalogStore`] capability trait.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod record;
mod select;
mod single_lock;
mod traits;
mod two_level;

pub use record::BookRecord;
pub use single_lock::SingleLockBookStore;
pub use traits::{BookStoreOps, CatalogStore, StockManagerOps};
pub use two_level::TwoLevelBookStore;
