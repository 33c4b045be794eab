//! The live, mutable catalog entry
//!
//! `BookRecord` is owned exclusively by a store's catalog map and mutated
//! only while its per-key lock is held in exclusive mode. Callers only ever
//! see the immutable snapshots produced by [`BookRecord::stock_book`] and
//! [`BookRecord::book`].

use folio_core::{Book, Isbn, StockBook};

/// One catalog entry's live state.
///
/// Invariants: price is non-negative, counters never go below zero, and a
/// zero rating count implies a zero rating total.
#[derive(Debug, Clone)]
pub struct BookRecord {
    isbn: Isbn,
    title: String,
    author: String,
    price: f32,
    num_copies: u32,
    num_sale_misses: u64,
    total_rating: u64,
    num_times_rated: u64,
    editor_pick: bool,
}

impl BookRecord {
    /// Build a record from a validated `add_books` argument.
    pub fn new(book: &StockBook) -> Self {
        BookRecord {
            isbn: book.isbn,
            title: book.title.clone(),
            author: book.author.clone(),
            price: book.price,
            num_copies: book.num_copies,
            num_sale_misses: book.num_sale_misses,
            total_rating: book.total_rating,
            num_times_rated: book.num_times_rated,
            editor_pick: book.editor_pick,
        }
    }

    /// The entry's key.
    pub fn isbn(&self) -> Isbn {
        self.isbn
    }

    /// Copies currently in stock.
    pub fn num_copies(&self) -> u32 {
        self.num_copies
    }

    /// Whether at least `requested` copies are in stock.
    pub fn copies_in_store(&self, requested: u64) -> bool {
        u64::from(self.num_copies) >= requested
    }

    /// Whether this entry is flagged as an editor pick.
    pub fn editor_pick(&self) -> bool {
        self.editor_pick
    }

    /// Whether this entry has received at least one rating.
    pub fn is_rated(&self) -> bool {
        self.num_times_rated > 0
    }

    /// Restock.
    pub fn add_copies(&mut self, count: u32) {
        self.num_copies = self.num_copies.saturating_add(count);
    }

    /// Debit stock. Callers check [`copies_in_store`](Self::copies_in_store)
    /// under the exclusive lock first, so the debit cannot underflow.
    pub fn sell_copies(&mut self, count: u32) {
        debug_assert!(count <= self.num_copies);
        self.num_copies = self.num_copies.saturating_sub(count);
    }

    /// Record demand that could not be served.
    pub fn record_sale_miss(&mut self, shortfall: u64) {
        self.num_sale_misses += shortfall;
    }

    /// Apply one rating. The rating has already passed range validation.
    pub fn add_rating(&mut self, rating: i32) {
        self.total_rating += rating as u64;
        self.num_times_rated += 1;
    }

    /// Set the editor-pick flag.
    pub fn set_editor_pick(&mut self, pick: bool) {
        self.editor_pick = pick;
    }

    /// Full stock-management snapshot.
    pub fn stock_book(&self) -> StockBook {
        StockBook {
            isbn: self.isbn,
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
            num_copies: self.num_copies,
            num_sale_misses: self.num_sale_misses,
            total_rating: self.total_rating,
            num_times_rated: self.num_times_rated,
            editor_pick: self.editor_pick,
        }
    }

    /// Client-facing snapshot.
    pub fn book(&self) -> Book {
        Book {
            isbn: self.isbn,
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
        }
    }

    /// Average rating, or `-1.0` when unrated.
    pub fn average_rating(&self) -> f64 {
        if self.num_times_rated == 0 {
            -1.0
        } else {
            self.total_rating as f64 / self.num_times_rated as f64
        }
    }
}
