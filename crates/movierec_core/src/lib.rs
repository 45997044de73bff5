//! Core recommendation logic for movierec.
//!
//! User-based collaborative filtering: raw `(user, item, rating)` records are
//! loaded into a [`RatingStore`], users are compared with Pearson correlation
//! by the [`SimilarityEngine`], and [`RecommendService`] turns positively
//! correlated neighbours into ranked predictions for unseen items.
//!
//! This crate never touches storage; callers hand it already-read records.

pub mod logging;
pub mod model;
pub mod service;
pub mod similarity;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::rating::{
    ItemId, MalformedRecordError, MalformedRecordKind, Rating, RawRecord, RecordField, UserId,
};
pub use model::recommendation::Recommendation;
pub use service::recommend_service::{
    recommend, RecommendError, RecommendOptions, RecommendResult, RecommendService,
};
pub use similarity::pearson::{pearson, SimilarUser, SimilarityEngine, UnknownUserError};
pub use store::rating_store::{RatingMap, RatingStore, StoreResult};
pub use store::shared::SharedRatingStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
