//! Input-validation predicates
//!
//! The store calls these before taking any lock; a failed predicate aborts
//! the whole call with no observable side effects.

use crate::error::{Error, Result};
use crate::types::{Isbn, StockBook};

/// Lowest accepted rating.
pub const MIN_RATING: i32 = 0;

/// Highest accepted rating.
pub const MAX_RATING: i32 = 5;

/// A valid quantity (copies to add or buy) is strictly positive.
pub const fn is_valid_quantity(quantity: i32) -> bool {
    quantity > 0
}

/// A valid rating lies in `MIN_RATING..=MAX_RATING`.
pub const fn is_valid_rating(rating: i32) -> bool {
    rating >= MIN_RATING && rating <= MAX_RATING
}

/// Titles and authors must contain at least one non-whitespace character.
pub fn is_nonempty_text(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Validate the describable fields of a new catalog entry.
///
/// Duplicate detection is the store's job; this only checks the entry in
/// isolation: well-formed ISBN, non-empty title and author, at least one
/// copy, and a finite non-negative price.
pub fn validate_new_book(book: &StockBook) -> Result<()> {
    if !book.isbn.is_well_formed() {
        return Err(Error::InvalidIsbn(book.isbn));
    }

    if !is_nonempty_text(&book.title) {
        return Err(Error::InvalidBook {
            isbn: book.isbn,
            reason: "empty title".to_string(),
        });
    }

    if !is_nonempty_text(&book.author) {
        return Err(Error::InvalidBook {
            isbn: book.isbn,
            reason: "empty author".to_string(),
        });
    }

    if book.num_copies == 0 {
        return Err(Error::InvalidBook {
            isbn: book.isbn,
            reason: "must be stocked with at least one copy".to_string(),
        });
    }

    if !book.price.is_finite() || book.price < 0.0 {
        return Err(Error::InvalidBook {
            isbn: book.isbn,
            reason: format!("invalid price {}", book.price),
        });
    }

    Ok(())
}

/// Reject a malformed ISBN.
pub fn validate_isbn(isbn: Isbn) -> Result<()> {
    if isbn.is_well_formed() {
        Ok(())
    } else {
        Err(Error::InvalidIsbn(isbn))
    }
}
