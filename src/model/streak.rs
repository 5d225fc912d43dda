use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// The single persisted document: which team holds the belt and how far the
/// evaluation has progressed. Replaced wholesale on every change; individual
/// fields are never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub holder_name: String,
    pub holder_team_id: i64,
    pub games_defended: u32,
    pub streak_start_date: NaiveDate,
    pub last_processed_date: NaiveDate,
}

impl StreakRecord {
    /// The belt changed hands: the challenger becomes the holder, the
    /// defended count resets, and both dates move to the deciding game.
    pub fn with_new_holder(&self, name: &str, team_id: i64, date: NaiveDate) -> Self {
        Self {
            id: self.id,
            holder_name: name.to_string(),
            holder_team_id: team_id,
            games_defended: 0,
            streak_start_date: date,
            last_processed_date: date,
        }
    }

    /// The holder defended `additional` more games through `through`.
    pub fn with_defenses(&self, additional: u32, through: NaiveDate) -> Self {
        Self {
            games_defended: self.games_defended + additional,
            last_processed_date: through,
            ..self.clone()
        }
    }

    /// Advance the processed-through date without changing the streak.
    /// Used when a batch was consumed without a determining game.
    pub fn with_processed_through(&self, date: NaiveDate) -> Self {
        Self {
            last_processed_date: date,
            ..self.clone()
        }
    }
}
