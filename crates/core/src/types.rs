//! Domain types for the catalog
//!
//! Snapshots ([`Book`], [`StockBook`]) are plain owned data: callers can keep
//! them as long as they like without holding any lock, and mutating a snapshot
//! never touches store state.

use serde::{Deserialize, Serialize};

/// Unique identifier for a catalog entry.
///
/// Well-formed ISBNs are strictly positive; the raw value is kept so that
/// malformed input can flow to validation instead of being unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Isbn(i64);

impl Isbn {
    /// Wrap a raw ISBN value. Validity is checked by the store, not here.
    pub const fn new(raw: i64) -> Self {
        Isbn(raw)
    }

    /// The raw value.
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether this ISBN is well-formed (strictly positive).
    pub const fn is_well_formed(self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for Isbn {
    fn from(raw: i64) -> Self {
        Isbn(raw)
    }
}

impl std::fmt::Display for Isbn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-facing snapshot of a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// The entry's key.
    pub isbn: Isbn,
    /// Title, non-empty.
    pub title: String,
    /// Author, non-empty.
    pub author: String,
    /// Price, non-negative.
    pub price: f32,
}

/// Full stock-management snapshot of a catalog entry.
///
/// Also the argument type for `add_books`: the counters of a new entry are
/// normally zero, which is what [`StockBook::new`] produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBook {
    /// The entry's key.
    pub isbn: Isbn,
    /// Title, non-empty.
    pub title: String,
    /// Author, non-empty.
    pub author: String,
    /// Price, non-negative.
    pub price: f32,
    /// Copies currently in stock.
    pub num_copies: u32,
    /// Cumulative shortfall over all failed purchase attempts.
    pub num_sale_misses: u64,
    /// Sum of all ratings received.
    pub total_rating: u64,
    /// Number of ratings received.
    pub num_times_rated: u64,
    /// Whether this entry is an editor pick.
    pub editor_pick: bool,
}

impl StockBook {
    /// A fresh entry with all counters at zero and the pick flag cleared.
    pub fn new(
        isbn: Isbn,
        title: impl Into<String>,
        author: impl Into<String>,
        price: f32,
        num_copies: u32,
    ) -> Self {
        StockBook {
            isbn,
            title: title.into(),
            author: author.into(),
            price,
            num_copies,
            num_sale_misses: 0,
            total_rating: 0,
            num_times_rated: 0,
            editor_pick: false,
        }
    }

    /// Average rating, or `-1.0` for an unrated entry.
    pub fn average_rating(&self) -> f64 {
        if self.num_times_rated == 0 {
            -1.0
        } else {
            self.total_rating as f64 / self.num_times_rated as f64
        }
    }

    /// The client-facing view of this snapshot.
    pub fn book(&self) -> Book {
        Book {
            isbn: self.isbn,
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
        }
    }
}

/// A (key, quantity) pair for `add_copies` and `buy_books`.
///
/// The quantity is signed so that invalid input can reach validation; a valid
/// quantity is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCopy {
    /// The entry's key.
    pub isbn: Isbn,
    /// Requested number of copies.
    pub num_copies: i32,
}

impl BookCopy {
    /// Construct a pair.
    pub fn new(isbn: Isbn, num_copies: i32) -> Self {
        BookCopy { isbn, num_copies }
    }
}

/// A (key, rating) pair for `rate_books`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRating {
    /// The entry's key.
    pub isbn: Isbn,
    /// Rating, valid in `0..=5`.
    pub rating: i32,
}

impl BookRating {
    /// Construct a pair.
    pub fn new(isbn: Isbn, rating: i32) -> Self {
        BookRating { isbn, rating }
    }
}

/// A (key, flag) pair for `update_editor_picks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorPick {
    /// The entry's key.
    pub isbn: Isbn,
    /// The new value of the pick flag.
    pub pick: bool,
}

impl EditorPick {
    /// Construct a pair.
    pub fn new(isbn: Isbn, pick: bool) -> Self {
        EditorPick { isbn, pick }
    }
}
