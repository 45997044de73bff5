//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and similarity queries into use-case level APIs.
//! - Keep CLI/host layers decoupled from ranking internals.

pub mod recommend_service;
