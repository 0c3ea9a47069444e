//! Response shaping
//!
//! External JSON views of the domain types. Field names follow the client
//! contract (`yearReleased`, `imageUrl`, `firstName`, ...), nested relations
//! are emitted as objects.

use serde::{Deserialize, Serialize};
use stowaway_core::types::{Condition, Genre, Record, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub id: i64,
    pub artist: String,
    pub album: String,
    pub year_released: Option<i64>,
    pub image_url: String,
    pub condition: ConditionResponse,
    pub genres: Vec<GenreResponse>,
    pub user: UserResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionResponse {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

impl From<&Condition> for ConditionResponse {
    fn from(condition: &Condition) -> Self {
        Self {
            id: condition.id,
            label: condition.label.clone(),
        }
    }
}

impl From<&Genre> for GenreResponse {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name.clone(),
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
        }
    }
}

impl From<&Record> for RecordResponse {
    fn from(record: &Record) -> Self {
        let mut genres: Vec<GenreResponse> = record.genres.iter().map(Into::into).collect();
        genres.sort_by_key(|g| g.id);

        Self {
            id: record.id,
            artist: record.artist.clone(),
            album: record.album.clone(),
            year_released: record.year_released,
            image_url: record.image_url.clone(),
            condition: (&record.condition).into(),
            genres,
            user: (&record.user).into(),
        }
    }
}
