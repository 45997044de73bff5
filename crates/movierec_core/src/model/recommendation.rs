//! Recommendation query output.

use crate::model::rating::ItemId;
use serde::{Deserialize, Serialize};

/// One ranked recommendation for a target user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item: ItemId,
    /// Similarity-weighted average of the neighbours' ratings for `item`.
    pub score: f64,
    /// Number of positive-similarity neighbours that rated `item`.
    pub supporting_users: usize,
}

#[cfg(test)]
mod tests {
    use super::Recommendation;

    #[test]
    fn serializes_with_flat_field_names() {
        let recommendation = Recommendation {
            item: "Forrest Gump".to_string(),
            score: 4.25,
            supporting_users: 2,
        };
        let json = serde_json::to_value(&recommendation).unwrap();
        assert_eq!(json["item"], "Forrest Gump");
        assert_eq!(json["score"], 4.25);
        assert_eq!(json["supporting_users"], 2);
    }
}
