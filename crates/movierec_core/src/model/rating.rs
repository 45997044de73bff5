//! Rating records and load-time validation.
//!
//! # Responsibility
//! - Describe the raw `(user, item, rating)` triple handed over by I/O
//!   collaborators.
//! - Normalize raw triples into validated `Rating` values.
//!
//! # Invariants
//! - Identifiers are trimmed; an identifier that is empty after trimming is
//!   treated as missing.
//! - Rating values must parse as finite `f64`. Range is not enforced.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User identifier as it appears in the input data.
pub type UserId = String;

/// Item (movie) identifier as it appears in the input data.
pub type ItemId = String;

/// Unvalidated input record.
///
/// Every field is optional so that a missing column and an empty cell are
/// reported through the same `MalformedRecordError` path. The item column is
/// accepted under both `item` and `movie` names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default, alias = "movie")]
    pub item: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
}

impl RawRecord {
    /// Builds a fully populated raw record.
    pub fn new(
        user: impl Into<String>,
        item: impl Into<String>,
        rating: impl Into<String>,
    ) -> Self {
        Self {
            user: Some(user.into()),
            item: Some(item.into()),
            rating: Some(rating.into()),
        }
    }

    /// Validates this record into a `Rating`.
    ///
    /// `index` is the 0-based position of the record in the load sequence and
    /// is only used for error reporting.
    pub fn normalize(&self, index: usize) -> Result<Rating, MalformedRecordError> {
        let user = required_field(self.user.as_deref(), RecordField::User, index)?;
        let item = required_field(self.item.as_deref(), RecordField::Item, index)?;
        let raw_rating = required_field(self.rating.as_deref(), RecordField::Rating, index)?;

        let value = raw_rating
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| MalformedRecordError {
                index,
                kind: MalformedRecordKind::InvalidRating(raw_rating.to_string()),
            })?;

        Ok(Rating {
            user: user.to_string(),
            item: item.to_string(),
            value,
        })
    }
}

/// Validated rating tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user: UserId,
    pub item: ItemId,
    pub value: f64,
}

impl Rating {
    /// Creates a rating without validation; see [`Rating::validate`].
    pub fn new(user: impl Into<UserId>, item: impl Into<ItemId>, value: f64) -> Self {
        Self {
            user: user.into(),
            item: item.into(),
            value,
        }
    }

    /// Applies the same checks as [`RawRecord::normalize`] to an already
    /// typed rating and returns it with trimmed identifiers.
    ///
    /// # Errors
    /// - `MissingField` when an identifier is blank.
    /// - `InvalidRating` when the value is not finite.
    pub fn validate(self, index: usize) -> Result<Self, MalformedRecordError> {
        let user = required_field(Some(self.user.as_str()), RecordField::User, index)?;
        let item = required_field(Some(self.item.as_str()), RecordField::Item, index)?;
        if !self.value.is_finite() {
            return Err(MalformedRecordError {
                index,
                kind: MalformedRecordKind::InvalidRating(self.value.to_string()),
            });
        }
        Ok(Self::new(user, item, self.value))
    }
}

/// Input field names used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    User,
    Item,
    Rating,
}

impl RecordField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Item => "item",
            Self::Rating => "rating",
        }
    }
}

/// Reason a raw record was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecordKind {
    /// Field is absent or blank.
    MissingField(RecordField),
    /// Rating text is not a finite number.
    InvalidRating(String),
}

/// Load-time rejection of one raw record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecordError {
    /// 0-based position of the record in the load sequence.
    pub index: usize,
    pub kind: MalformedRecordKind,
}

impl Display for MalformedRecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            MalformedRecordKind::MissingField(field) => write!(
                f,
                "malformed record #{}: missing or empty `{}` field",
                self.index,
                field.as_str()
            ),
            MalformedRecordKind::InvalidRating(raw) => write!(
                f,
                "malformed record #{}: rating `{raw}` is not a finite number",
                self.index
            ),
        }
    }
}

impl Error for MalformedRecordError {}

fn required_field(
    value: Option<&str>,
    field: RecordField,
    index: usize,
) -> Result<&str, MalformedRecordError> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed),
        _ => Err(MalformedRecordError {
            index,
            kind: MalformedRecordKind::MissingField(field),
        }),
    }
}
