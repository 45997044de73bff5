//! Pearson correlation between users over their commonly rated items.
//!
//! # Responsibility
//! - Compute population Pearson correlation for a user pair.
//! - Produce the ranked neighbour list consumed by the recommendation layer.
//!
//! # Invariants
//! - Fewer than two shared items, or zero variance on either side, yields
//!   `None`.
//! - `similarity(a, b)` and `similarity(b, a)` are bit-for-bit equal.
//! - Defined results lie in `[-1, 1]`.
//! - Ranked output is ordered by score descending, then user ascending.

use crate::model::rating::UserId;
use crate::store::rating_store::RatingStore;
use log::{debug, trace};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Query target is not present in the rating store.
///
/// Carries the known users so callers can present alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownUserError {
    pub requested_user: String,
    /// All users in the store, ascending.
    pub known_users: Vec<UserId>,
}

impl UnknownUserError {
    pub(crate) fn new(requested_user: &str, store: &RatingStore) -> Self {
        Self {
            requested_user: requested_user.to_string(),
            known_users: store.users().into_iter().map(str::to_string).collect(),
        }
    }
}

impl Display for UnknownUserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "user `{}` not found ({} known users)",
            self.requested_user,
            self.known_users.len()
        )
    }
}

impl Error for UnknownUserError {}

/// Neighbour entry produced by [`SimilarityEngine::ranked_similar_users`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarUser {
    pub user: UserId,
    pub score: f64,
}

/// Read-only similarity queries over one rating store.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityEngine<'store> {
    store: &'store RatingStore,
}

impl<'store> SimilarityEngine<'store> {
    pub fn new(store: &'store RatingStore) -> Self {
        Self { store }
    }

    /// Pearson correlation of two users over the items both rated.
    ///
    /// Returns `None` when fewer than two items are shared, or when either
    /// user gave the same value to every shared item. Unknown users share no
    /// items and therefore also yield `None`.
    pub fn similarity(&self, target: &str, other: &str) -> Option<f64> {
        let target_ratings = self.store.items_rated_by(target);
        let other_ratings = self.store.items_rated_by(other);

        let mut shared: Vec<(&str, f64, f64)> = target_ratings
            .iter()
            .filter_map(|(item, x)| other_ratings.get(item).map(|y| (item.as_str(), *x, *y)))
            .collect();
        // Summation order must not depend on which side is iterated.
        shared.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let xs: Vec<f64> = shared.iter().map(|(_, x, _)| *x).collect();
        let ys: Vec<f64> = shared.iter().map(|(_, _, y)| *y).collect();
        pearson(&xs, &ys)
    }

    /// Scores every other user against `target` and ranks the defined results.
    ///
    /// # Errors
    /// - Returns `UnknownUserError` when `target` is not in the store.
    pub fn ranked_similar_users(&self, target: &str) -> Result<Vec<SimilarUser>, UnknownUserError> {
        if !self.store.has_user(target) {
            debug!("event=similarity_ranked module=similarity status=unknown_user");
            return Err(UnknownUserError::new(target, self.store));
        }

        // Users without any co-rated item can never reach two shared items.
        let co_raters: BTreeSet<&str> = self
            .store
            .items_rated_by(target)
            .keys()
            .flat_map(|item| self.store.ratings_for_item(item).keys())
            .map(String::as_str)
            .filter(|user| *user != target)
            .collect();

        let mut ranked: Vec<SimilarUser> = Vec::with_capacity(co_raters.len());
        for user in &co_raters {
            match self.similarity(target, user) {
                Some(score) => ranked.push(SimilarUser {
                    user: (*user).to_string(),
                    score,
                }),
                None => trace!("event=similarity_undefined module=similarity"),
            }
        }
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.user.cmp(&b.user))
        });

        debug!(
            "event=similarity_ranked module=similarity status=ok co_raters={} defined={}",
            co_raters.len(),
            ranked.len()
        );
        Ok(ranked)
    }
}

/// Population Pearson correlation of two paired sequences.
///
/// Returns `None` when the sequences differ in length, hold fewer than two
/// pairs, either sequence is constant, or the correlation is not a finite
/// number (for example when an input value is infinite).
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n < 2 || n != ys.len() || is_constant(xs) || is_constant(ys) {
        return None;
    }

    // Correlation is invariant under positive scaling. Dividing by the
    // largest magnitude keeps every deviation product within [-4, 4].
    let xs = scaled(xs);
    let ys = scaled(ys);

    let count = n as f64;
    let mean_x = xs.iter().sum::<f64>() / count;
    let mean_y = ys.iter().sum::<f64>() / count;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in xs.iter().zip(&ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }
    covariance /= count;
    variance_x /= count;
    variance_y /= count;

    // sqrt of the product keeps self-correlation at exactly 1.0.
    let denominator = (variance_x * variance_y).sqrt();
    if denominator <= 0.0 || denominator.is_nan() {
        return None;
    }
    let score = covariance / denominator;
    if !score.is_finite() {
        return None;
    }
    Some(score.clamp(-1.0, 1.0))
}

fn scaled(values: &[f64]) -> Vec<f64> {
    let magnitude = values
        .iter()
        .fold(0.0_f64, |max, value| max.max(value.abs()));
    values.iter().map(|value| value / magnitude).collect()
}

fn is_constant(values: &[f64]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().all(|value| value == first),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::{is_constant, pearson, scaled};

    #[test]
    fn pearson_of_identical_sequences_is_exactly_one() {
        assert_eq!(pearson(&[5.0, 4.0, 3.0], &[5.0, 4.0, 3.0]), Some(1.0));
        assert_eq!(
            pearson(&[0.1, 0.7, 0.3, 0.9], &[0.1, 0.7, 0.3, 0.9]),
            Some(1.0)
        );
    }

    #[test]
    fn pearson_of_linear_sequences_is_unit_magnitude() {
        let aligned = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((aligned - 1.0).abs() < 1e-12);
        let inverse = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        assert!((inverse + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_matches_hand_computed_value() {
        // means 2 and 3; cov = 2/3, var_x = 2/3, var_y = 8/3
        let score = pearson(&[1.0, 2.0, 3.0], &[1.0, 5.0, 3.0]).unwrap();
        assert!((score - 0.5).abs() < 1e-12, "unexpected score {score}");
    }

    #[test]
    fn pearson_is_undefined_for_short_or_constant_input() {
        assert_eq!(pearson(&[4.0], &[5.0]), None);
        assert_eq!(pearson(&[], &[]), None);
        assert_eq!(pearson(&[4.0, 4.0, 4.0], &[1.0, 2.0, 3.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[0.1, 0.1]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn constant_check_handles_empty_and_single_values() {
        assert!(is_constant(&[]));
        assert!(is_constant(&[3.0]));
        assert!(!is_constant(&[3.0, 3.5]));
    }

    #[test]
    fn pearson_stays_finite_for_huge_ratings() {
        // Unscaled deviation products overflow to infinity at this magnitude.
        let huge = [1e200, -1e200];
        assert_eq!(pearson(&huge, &huge), Some(1.0));

        let inverse = pearson(&huge, &[-1e200, 1e200]).unwrap();
        assert!((inverse + 1.0).abs() < 1e-12, "unexpected score {inverse}");

        let mixed = pearson(&[1e200, 2e200, 3e200], &[1.0, 5.0, 3.0]).unwrap();
        assert!((mixed - 0.5).abs() < 1e-12, "unexpected score {mixed}");
    }

    #[test]
    fn pearson_rejects_non_finite_input() {
        assert_eq!(pearson(&[f64::INFINITY, 1.0], &[1.0, 2.0]), None);
        assert_eq!(pearson(&[f64::MAX, -f64::MAX], &[1.0, 2.0]), Some(-1.0));
    }

    #[test]
    fn scaling_bounds_values_by_unit_magnitude() {
        assert_eq!(scaled(&[2.0, -4.0, 1.0]), vec![0.5, -1.0, 0.25]);
    }
}
