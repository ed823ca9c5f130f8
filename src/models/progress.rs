// src/models/progress.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One document in the 'progress' collection, keyed by the learner's identity.
/// A later attempt by the same identity replaces the earlier one.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct SessionRecord {
    pub lesson: String,
    pub score: i16,
    #[sqlx(rename = "recorded_at")]
    pub timestamp: DateTime<Utc>,
    /// "<lat>, <lon>" or "Not available".
    pub location: String,
}
