//! User-user similarity scoring.
//!
//! # Responsibility
//! - Score how closely two users' rating patterns agree.
//! - Rank every other user by similarity to a target user.
//!
//! # Invariants
//! - Undefined similarities are excluded, never coerced to zero.
//! - Ranking order is deterministic for a given store.

pub mod pearson;
