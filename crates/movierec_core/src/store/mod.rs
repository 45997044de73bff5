//! In-memory rating storage.
//!
//! # Responsibility
//! - Build the sparse rating matrix once from validated input records.
//! - Answer read-only user/item queries for the similarity and ranking layers.
//! - Publish whole-store snapshots for hosts that share one store across
//!   threads.
//!
//! # Invariants
//! - A store is immutable after `RatingStore::load` returns.
//! - A failed load never produces or publishes a partial store.

pub mod rating_store;
pub mod shared;
