//! Recommendation use-case service.
//!
//! # Responsibility
//! - Turn ranked neighbours into predicted scores for unseen items.
//! - Validate query arguments before touching the store.
//!
//! # Invariants
//! - Only neighbours with similarity strictly greater than zero contribute.
//! - Items already rated by the target user are never returned.
//! - Output is ordered by score descending, then item ascending, and holds at
//!   most `num_recs` entries.
//! - The store is never mutated.

use crate::model::recommendation::Recommendation;
use crate::similarity::pearson::{SimilarUser, SimilarityEngine, UnknownUserError};
use crate::store::rating_store::RatingStore;
use log::{debug, info};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for recommendation queries.
pub type RecommendResult<T> = Result<T, RecommendError>;

/// Query-level error for recommendation requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// Target user is not present in the store.
    UnknownUser(UnknownUserError),
    /// Caller-provided argument violates its constraint.
    InvalidArgument {
        name: &'static str,
        value: String,
        constraint: &'static str,
    },
}

impl Display for RecommendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownUser(err) => write!(f, "{err}"),
            Self::InvalidArgument {
                name,
                value,
                constraint,
            } => write!(f, "invalid argument `{name}` = `{value}`: {constraint}"),
        }
    }
}

impl Error for RecommendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownUser(err) => Some(err),
            Self::InvalidArgument { .. } => None,
        }
    }
}

impl From<UnknownUserError> for RecommendError {
    fn from(value: UnknownUserError) -> Self {
        Self::UnknownUser(value)
    }
}

/// Tuning knobs for candidate selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendOptions {
    /// When set, a neighbour's rating only counts toward an item if it is at
    /// least this value ("liked" threshold).
    pub min_candidate_rating: Option<f64>,
}

#[derive(Debug, Default)]
struct ScoreAccumulator {
    weighted_sum: f64,
    weight: f64,
    supporting_users: usize,
}

/// User-based collaborative filtering over one rating store.
pub struct RecommendService<'store> {
    store: &'store RatingStore,
    engine: SimilarityEngine<'store>,
    options: RecommendOptions,
}

impl<'store> RecommendService<'store> {
    /// Creates a service with default options.
    pub fn new(store: &'store RatingStore) -> Self {
        Self::with_options(store, RecommendOptions::default())
    }

    pub fn with_options(store: &'store RatingStore, options: RecommendOptions) -> Self {
        Self {
            store,
            engine: SimilarityEngine::new(store),
            options,
        }
    }

    /// Recommends up to `num_recs` unseen items for `target`.
    ///
    /// An empty list is a valid outcome when no positive-similarity neighbour
    /// rated anything the target has not rated.
    ///
    /// # Errors
    /// - `InvalidArgument` when `num_recs` is zero.
    /// - `UnknownUser` when `target` is not in the store.
    pub fn recommend(&self, target: &str, num_recs: usize) -> RecommendResult<Vec<Recommendation>> {
        if num_recs == 0 {
            return Err(RecommendError::InvalidArgument {
                name: "num_recs",
                value: num_recs.to_string(),
                constraint: "must be at least 1",
            });
        }

        let neighbours = self.engine.ranked_similar_users(target)?;
        let positive: Vec<&SimilarUser> = neighbours
            .iter()
            .take_while(|neighbour| neighbour.score > 0.0)
            .collect();

        let mut recommendations = self.score_candidates(target, &positive);
        let candidates = recommendations.len();
        recommendations.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.item.cmp(&b.item))
        });
        recommendations.truncate(num_recs);

        info!(
            "event=recommend module=service status=ok neighbours={} positive={} candidates={} returned={}",
            neighbours.len(),
            positive.len(),
            candidates,
            recommendations.len()
        );
        Ok(recommendations)
    }

    fn score_candidates(&self, target: &str, neighbours: &[&SimilarUser]) -> Vec<Recommendation> {
        let seen = self.store.items_rated_by(target);
        let mut scores: HashMap<&str, ScoreAccumulator> = HashMap::new();

        for neighbour in neighbours {
            for (item, value) in self.store.items_rated_by(&neighbour.user) {
                if seen.contains_key(item) {
                    continue;
                }
                if let Some(min_rating) = self.options.min_candidate_rating {
                    if *value < min_rating {
                        continue;
                    }
                }
                let entry = scores.entry(item.as_str()).or_default();
                entry.weighted_sum += neighbour.score * value;
                entry.weight += neighbour.score;
                entry.supporting_users += 1;
            }
        }

        debug!(
            "event=candidates_scored module=service neighbours={} candidates={}",
            neighbours.len(),
            scores.len()
        );

        scores
            .into_iter()
            .map(|(item, acc)| Recommendation {
                item: item.to_string(),
                score: acc.weighted_sum / acc.weight,
                supporting_users: acc.supporting_users,
            })
            .collect()
    }
}

/// One-shot recommendation query with default options.
pub fn recommend(
    store: &RatingStore,
    target: &str,
    num_recs: usize,
) -> RecommendResult<Vec<Recommendation>> {
    RecommendService::new(store).recommend(target, num_recs)
}
