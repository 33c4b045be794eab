//! Error types for catalog operations
//!
//! Every public operation either completes fully or fails with one of these
//! errors and no partial mutation. The single documented exception is
//! [`Error::InsufficientStock`]: a rejected purchase still records the
//! per-item shortfall in the demand counters before failing.

use crate::types::Isbn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The amount by which a purchase request exceeded available stock for one
/// item, captured at the time the buy call inspected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    /// The insufficiently stocked entry.
    pub isbn: Isbn,
    /// Copies the caller asked for, summed over duplicate entries in the
    /// call, so this can exceed any single stock level.
    pub requested: u64,
    /// Copies actually in stock.
    pub available: u64,
}

impl Shortfall {
    /// `requested - available`; the amount added to the demand counter.
    /// Saturates at zero, so a hand-built value with `requested` below
    /// `available` reads as no shortfall instead of underflowing.
    pub fn amount(&self) -> u64 {
        self.requested.saturating_sub(self.available)
    }
}

/// All catalog errors.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// An input collection was empty where that is itself invalid.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Malformed key (non-positive ISBN).
    #[error("invalid ISBN: {0}")]
    InvalidIsbn(Isbn),

    /// Well-formed key not present in the catalog.
    #[error("ISBN not in catalog: {0}")]
    BookNotFound(Isbn),

    /// Key already present on create.
    #[error("duplicate ISBN: {0}")]
    DuplicateIsbn(Isbn),

    /// Bad title, author, price, or copy count on a new entry.
    #[error("invalid book {isbn}: {reason}")]
    InvalidBook {
        /// The offending entry's key.
        isbn: Isbn,
        /// What was wrong with it.
        reason: String,
    },

    /// Non-positive copy count on a buy or add-copies call.
    #[error("invalid quantity {quantity} for ISBN {isbn}")]
    InvalidQuantity {
        /// The entry the quantity referred to.
        isbn: Isbn,
        /// The rejected quantity.
        quantity: i32,
    },

    /// Rating outside the accepted range.
    #[error("invalid rating {rating} for ISBN {isbn}")]
    InvalidRating {
        /// The entry the rating referred to.
        isbn: Isbn,
        /// The rejected rating.
        rating: i32,
    },

    /// A purchase exceeded available stock for one or more items.
    ///
    /// The whole call fails, but each listed shortfall has already been
    /// added to the item's sale-miss counter as a demand signal.
    #[error("insufficient stock for {} item(s)", shortfalls.len())]
    InsufficientStock {
        /// One entry per insufficiently stocked item.
        shortfalls: Vec<Shortfall>,
    },
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::BookNotFound(_))
    }

    /// Check if this error reports rejected input (as opposed to a failed
    /// purchase, which has the demand-counter side effect).
    pub fn is_validation(&self) -> bool {
        !matches!(self, Error::InsufficientStock { .. })
    }

    /// Check if this is an insufficient-stock error.
    pub fn is_insufficient_stock(&self) -> bool {
        matches!(self, Error::InsufficientStock { .. })
    }
}
