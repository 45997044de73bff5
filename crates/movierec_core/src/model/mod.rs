//! Domain model for ratings and recommendation output.
//!
//! # Responsibility
//! - Define the raw input record shape accepted by the rating store.
//! - Define validated `Rating` tuples and transient `Recommendation` output.
//!
//! # Invariants
//! - Every `Rating` admitted into a store carries non-empty identifiers and a
//!   finite value, whichever load path it came through.
//! - Recommendations are query output only and are never persisted.

pub mod rating;
pub mod recommendation;
