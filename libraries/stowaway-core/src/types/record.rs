//! Record types
//!
//! A record is one physical album in somebody's collection. `Record` is the
//! read model with every reference resolved; `NewRecord` is the write model
//! carrying only ids.

use super::{Condition, ConditionId, Genre, GenreId, User, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub type RecordId = i64;

/// A collection entry with its condition, genres and owner resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub artist: String,
    pub album: String,
    pub year_released: Option<i64>,
    pub image_url: String,
    pub condition: Condition,
    /// Ordered by genre id
    pub genres: Vec<Genre>,
    pub user: User,
}

/// Plain scalar fields of a record, as supplied by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub artist: String,
    pub album: String,
    pub year_released: Option<i64>,
    pub image_url: String,
}

/// Data for creating or overwriting a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub artist: String,
    pub album: String,
    pub year_released: Option<i64>,
    pub image_url: String,
    pub condition_id: ConditionId,
    /// Set semantics: a genre can only be attached once
    pub genre_ids: BTreeSet<GenreId>,
    pub user_id: UserId,
}

impl NewRecord {
    /// Build a write model from validated fields and already resolved references
    pub fn new(fields: RecordFields, condition: &Condition, genres: &[Genre], owner: UserId) -> Self {
        Self {
            artist: fields.artist,
            album: fields.album,
            year_released: fields.year_released,
            image_url: fields.image_url,
            condition_id: condition.id,
            genre_ids: genres.iter().map(|g| g.id).collect(),
            user_id: owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> RecordFields {
        RecordFields {
            artist: "High Vis".to_string(),
            album: "Blending".to_string(),
            year_released: None,
            image_url: String::new(),
        }
    }

    #[test]
    fn new_record_collapses_duplicate_genres() {
        let condition = Condition {
            id: 2,
            label: "Near Mint".to_string(),
        };
        let punk = Genre {
            id: 3,
            name: "Punk".to_string(),
        };
        let genres = vec![punk.clone(), punk];

        let record = NewRecord::new(fields(), &condition, &genres, 9);

        assert_eq!(record.genre_ids.len(), 1);
        assert!(record.genre_ids.contains(&3));
        assert_eq!(record.condition_id, 2);
        assert_eq!(record.user_id, 9);
        assert_eq!(record.year_released, None);
    }
}
