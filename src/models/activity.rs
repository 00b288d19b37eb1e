use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Inclusive average-mood band, serialized as `[low, high]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodRange(pub i32, pub i32);

impl MoodRange {
    pub fn low(&self) -> i32 {
        self.0
    }

    pub fn high(&self) -> i32 {
        self.1
    }

    pub fn contains(&self, mood: f64) -> bool {
        mood >= f64::from(self.0) && mood <= f64::from(self.1)
    }
}

/// Catalog entry. Loaded once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub mood_range: MoodRange,
}

/// Client-facing view of a catalog entry for today's listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodayActivity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub completed: bool,
}

impl TodayActivity {
    pub fn from_definition(def: &ActivityDefinition, completed: bool) -> Self {
        Self {
            id: def.id.clone(),
            title: def.title.clone(),
            description: def.description.clone(),
            duration: def.duration.clone(),
            category: def.category.clone(),
            difficulty: def.difficulty,
            completed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCompletion {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_id: String,
    #[sqlx(rename = "completed_on")]
    pub date: NaiveDate,
    pub notes: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCompletion {
    pub user_id: Uuid,
    pub activity_id: String,
    pub date: NaiveDate,
    pub notes: String,
}
