//! Condition types

use serde::{Deserialize, Serialize};

pub type ConditionId = i64;

/// Physical-state rating of a record (e.g. "Mint", "Very Good Plus")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub id: ConditionId,
    pub label: String,
}
