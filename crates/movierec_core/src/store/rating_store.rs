//! Sparse rating matrix with forward and reverse indexes.
//!
//! # Responsibility
//! - Own all rating data for one recommendation run.
//! - Provide O(1) lookups both by item and by user.
//!
//! # Invariants
//! - At most one value per `(user, item)` pair; later records overwrite
//!   earlier ones (last-write-wins).
//! - `by_item` and `by_user` always hold the same set of ratings.
//! - Missing entries mean "not rated", never zero.

use crate::model::rating::{ItemId, MalformedRecordError, Rating, RawRecord, UserId};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};

/// Result type for store construction.
pub type StoreResult<T> = Result<T, MalformedRecordError>;

/// Ratings keyed by item or by user, depending on the index.
pub type RatingMap = HashMap<String, f64>;

static EMPTY_RATINGS: Lazy<RatingMap> = Lazy::new(HashMap::new);

/// Immutable rating matrix built from one input sequence.
#[derive(Debug, Clone, Default)]
pub struct RatingStore {
    by_item: HashMap<ItemId, RatingMap>,
    by_user: HashMap<UserId, RatingMap>,
    rating_count: usize,
    overwritten_duplicates: usize,
}

impl RatingStore {
    /// Validates and loads raw records into a new store.
    ///
    /// # Errors
    /// - Returns `MalformedRecordError` for the first record with a missing or
    ///   blank field, or a rating that is not a finite number. Nothing is
    ///   returned for the records that preceded it.
    pub fn load<I>(records: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        Self::build(records, |record, index| record.normalize(index))
    }

    /// Builds a store from typed ratings.
    ///
    /// Each rating goes through `Rating::validate`, so blank identifiers and
    /// non-finite values are rejected exactly as in `load`. Duplicate
    /// `(user, item)` pairs follow the same last-write-wins policy.
    ///
    /// # Errors
    /// - Returns `MalformedRecordError` for the first invalid rating.
    pub fn from_ratings<I>(ratings: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = Rating>,
    {
        Self::build(ratings, Rating::validate)
    }

    /// Returns all distinct user identifiers in ascending order.
    pub fn users(&self) -> BTreeSet<&str> {
        self.by_user.keys().map(String::as_str).collect()
    }

    /// Returns all distinct item identifiers in ascending order.
    pub fn items(&self) -> BTreeSet<&str> {
        self.by_item.keys().map(String::as_str).collect()
    }

    /// Returns item -> value ratings of one user.
    ///
    /// Unknown users yield an empty mapping.
    pub fn items_rated_by(&self, user: &str) -> &RatingMap {
        self.by_user.get(user).unwrap_or(&EMPTY_RATINGS)
    }

    /// Returns user -> value ratings of one item.
    ///
    /// Unknown items yield an empty mapping.
    pub fn ratings_for_item(&self, item: &str) -> &RatingMap {
        self.by_item.get(item).unwrap_or(&EMPTY_RATINGS)
    }

    /// Returns one rating value when present.
    pub fn rating(&self, user: &str, item: &str) -> Option<f64> {
        self.by_user
            .get(user)
            .and_then(|ratings| ratings.get(item))
            .copied()
    }

    pub fn has_user(&self, user: &str) -> bool {
        self.by_user.contains_key(user)
    }

    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }

    pub fn item_count(&self) -> usize {
        self.by_item.len()
    }

    /// Number of distinct `(user, item)` ratings held.
    pub fn rating_count(&self) -> usize {
        self.rating_count
    }

    /// Number of input records that replaced an earlier rating for the same
    /// `(user, item)` pair.
    pub fn overwritten_duplicates(&self) -> usize {
        self.overwritten_duplicates
    }

    pub fn is_empty(&self) -> bool {
        self.rating_count == 0
    }

    fn build<T, I, F>(input: I, validate: F) -> StoreResult<Self>
    where
        I: IntoIterator<Item = T>,
        F: Fn(T, usize) -> StoreResult<Rating>,
    {
        let mut store = Self::default();
        for (index, entry) in input.into_iter().enumerate() {
            let rating = validate(entry, index).map_err(|err| {
                warn!(
                    "event=ratings_loaded module=store status=error index={}",
                    err.index
                );
                err
            })?;
            store.insert(rating);
        }
        store.log_loaded();
        Ok(store)
    }

    fn insert(&mut self, rating: Rating) {
        let Rating { user, item, value } = rating;
        let previous = self
            .by_user
            .entry(user.clone())
            .or_default()
            .insert(item.clone(), value);
        self.by_item.entry(item).or_default().insert(user, value);

        if previous.is_some() {
            self.overwritten_duplicates += 1;
        } else {
            self.rating_count += 1;
        }
    }

    fn log_loaded(&self) {
        info!(
            "event=ratings_loaded module=store status=ok users={} items={} ratings={}",
            self.user_count(),
            self.item_count(),
            self.rating_count
        );
        if self.overwritten_duplicates > 0 {
            debug!(
                "event=duplicate_ratings module=store policy=last_write_wins overwritten={}",
                self.overwritten_duplicates
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RatingStore;
    use crate::model::rating::{MalformedRecordKind, Rating, RecordField};

    #[test]
    fn forward_and_reverse_indexes_agree() {
        let store = RatingStore::from_ratings(vec![
            Rating::new("Alice", "Up", 4.0),
            Rating::new("Bob", "Up", 2.0),
            Rating::new("Bob", "Heat", 5.0),
        ])
        .unwrap();

        for user in store.users() {
            for (item, value) in store.items_rated_by(user) {
                assert_eq!(store.ratings_for_item(item).get(user), Some(value));
            }
        }
        assert_eq!(store.ratings_for_item("Up").len(), 2);
        assert_eq!(store.rating_count(), 3);
    }

    #[test]
    fn duplicate_pair_keeps_last_value_in_both_indexes() {
        let store = RatingStore::from_ratings(vec![
            Rating::new("Alice", "Up", 1.0),
            Rating::new("Alice", "Up", 5.0),
        ])
        .unwrap();

        assert_eq!(store.rating("Alice", "Up"), Some(5.0));
        assert_eq!(store.ratings_for_item("Up").get("Alice"), Some(&5.0));
        assert_eq!(store.rating_count(), 1);
        assert_eq!(store.overwritten_duplicates(), 1);
    }

    #[test]
    fn from_ratings_rejects_what_load_rejects() {
        let err = RatingStore::from_ratings(vec![
            Rating::new("Alice", "Up", 4.0),
            Rating::new("Bob", "Up", f64::NAN),
        ])
        .unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.kind, MalformedRecordKind::InvalidRating("NaN".into()));

        let err = RatingStore::from_ratings(vec![Rating::new("Alice", "", 4.0)]).unwrap_err();
        assert_eq!(
            err.kind,
            MalformedRecordKind::MissingField(RecordField::Item)
        );
    }
}
