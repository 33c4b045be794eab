//! Query shaping shared by both store implementations
//!
//! These run on already-snapshotted data, after the calling operation has
//! taken the locks the snapshot required.

use folio_core::{Book, BookCopy, Isbn, StockBook};
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};

/// Sum requested quantities per key.
///
/// The inputs have already passed quantity validation. Folding duplicates
/// into one total keeps the stock check sound when a call names the same
/// ISBN twice: checking each pair against the same starting stock would
/// let their sum exceed it. Totals are `u64` because each entry can be as
/// large as `i32::MAX`, so a few duplicates would overflow a 32-bit sum.
pub(crate) fn aggregate_quantities(orders: &[BookCopy]) -> FxHashMap<Isbn, u64> {
    let mut totals: FxHashMap<Isbn, u64> = FxHashMap::default();
    for order in orders {
        *totals.entry(order.isbn).or_insert(0) += order.num_copies as u64;
    }
    totals
}

/// Choose up to `count` books uniformly at random without replacement.
///
/// Everything is returned when the pool is no larger than `count`.
/// Rejection sampling over indices: draw until `count` distinct indices
/// have been seen.
pub(crate) fn sample_books(pool: Vec<Book>, count: usize) -> Vec<Book> {
    if pool.len() <= count {
        return pool;
    }

    let mut rng = rand::thread_rng();
    let mut picked: FxHashSet<usize> = FxHashSet::default();
    while picked.len() < count {
        picked.insert(rng.gen_range(0..pool.len()));
    }

    pool.into_iter()
        .enumerate()
        .filter(|(index, _)| picked.contains(index))
        .map(|(_, book)| book)
        .collect()
}

/// Rank rated entries by average rating descending, ties broken by
/// ascending ISBN, and keep the first `count`.
pub(crate) fn top_rated(mut snapshots: Vec<StockBook>, count: usize) -> Vec<Book> {
    snapshots.retain(|book| book.num_times_rated > 0);
    snapshots.sort_by(|a, b| {
        b.average_rating()
            .total_cmp(&a.average_rating())
            .then(a.isbn.cmp(&b.isbn))
    });
    snapshots.truncate(count);
    snapshots.iter().map(StockBook::book).collect()
}
