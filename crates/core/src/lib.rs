//! Core types for the Folio catalog store
//!
//! This crate defines the vocabulary shared by every layer of the system:
//! - [`Isbn`]: the unique key of a catalog entry
//! - [`Book`] / [`StockBook`]: immutable snapshots handed to callers
//! - [`BookCopy`], [`BookRating`], [`EditorPick`]: operation arguments
//! - [`Error`] / [`Result`]: the canonical error type for all operations
//! - [`validate`]: the input-validation predicates the store applies before
//!   taking any lock

#![warn(missing_docs)]

pub mod error;
pub mod types;
pub mod validate;

pub use error::{Error, Result, Shortfall};
pub use types::{Book, BookCopy, BookRating, EditorPick, Isbn, StockBook};
