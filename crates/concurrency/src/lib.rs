//! Concurrency layer for the Folio catalog store
//!
//! This crate implements the per-key half of the two-level locking protocol:
//! - [`LockRegistry`]: a concurrent table handing out one read/write lock per
//!   ISBN, created atomically on first reference
//! - [`SharedGuard`] / [`ExclusiveGuard`]: RAII guards; release is paired
//!   with acquisition by construction, never re-derived after the fact
//! - [`SharedLockSet`] / [`ExclusiveLockSet`]: multi-key acquisition in a
//!   fixed total order (ascending ISBN) with reverse-order release
//!
//! The catalog-wide lock that composes with these lives in the store itself;
//! this crate knows nothing about catalog contents.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod lockset;
pub mod registry;

pub use lockset::{ExclusiveLockSet, SharedLockSet};
pub use registry::{ExclusiveGuard, LockRegistry, SharedGuard};
