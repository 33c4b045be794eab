//! Shared fixtures for the catalog store suites.

use foliodb::prelude::*;

/// Default fixture ISBN.
pub const TEST_ISBN: i64 = 3044560;

/// Default fixture stock level.
pub const NUM_COPIES: u32 = 5;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn default_book() -> StockBook {
    StockBook::new(
        Isbn::new(TEST_ISBN),
        "The Art of Computer Programming",
        "Donald Knuth",
        300.0,
        NUM_COPIES,
    )
}

pub fn book(isbn: i64, copies: u32) -> StockBook {
    StockBook::new(Isbn::new(isbn), format!("Book {isbn}"), "Author", 10.0, copies)
}

/// A store seeded with the default fixture book.
pub fn seeded_store(strategy: LockingStrategy) -> Bookstore {
    init_tracing();
    let store = Bookstore::builder().strategy(strategy).build();
    store.add_books(&[default_book()]).unwrap();
    store
}

/// Run one test body against both locking strategies.
pub fn each_strategy(test: impl Fn(Bookstore)) {
    for strategy in [LockingStrategy::TwoLevel, LockingStrategy::SingleLock] {
        test(seeded_store(strategy));
    }
}

/// Catalog snapshot normalized for set comparison.
pub fn snapshot(store: &Bookstore) -> Vec<StockBook> {
    let mut books = store.get_all_books().unwrap();
    books.sort_by_key(|b| b.isbn);
    books
}
