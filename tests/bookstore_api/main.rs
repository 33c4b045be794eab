//! Catalog store integration tests
//!
//! Every suite runs against both locking strategies: the two-level store and
//! the single-lock baseline must be observably identical except for their
//! concurrency profile.

mod common;

mod functional;
mod properties;
