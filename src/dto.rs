//! # MoodBuddy: Request/Response DTOs
//!
//! API contract types for the mood and activity routes.
//!
//! Conventions:
//! - `*Request` / `*Query` → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Field names are camelCase on the wire
//! - Range checks are expressed via `validator` derive macros; presence
//!   checks for required fields live in the helpers at the bottom

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::mood_entry::{MoodEntry, MoodFields};

// ============================================================================
// Common
// ============================================================================

/// Standard success message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Mood
// ============================================================================

/// POST /api/mood/log
#[derive(Debug, Deserialize, Validate)]
pub struct LogMoodRequest {
    /// Mood score 1-10, required
    #[validate(range(min = 1, max = 10, message = "Mood must be between 1 and 10"))]
    pub mood: Option<i32>,

    #[validate(range(min = 1, max = 5, message = "Energy must be between 1 and 5"))]
    pub energy: Option<i32>,

    /// Stress score 1-5 (1=very low, 5=very high)
    #[validate(range(min = 1, max = 5, message = "Stress must be between 1 and 5"))]
    pub stress: Option<i32>,

    /// Hours slept
    #[validate(range(min = 0, max = 12, message = "Sleep must be between 0 and 12 hours"))]
    pub sleep: Option<i32>,

    #[validate(length(max = 5000, message = "Note must be under 5000 characters"))]
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMoodResponse {
    pub message: String,
    pub mood_entry: MoodEntry,
}

/// GET /api/mood/entries query params
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntriesQuery {
    /// Default: 30
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}

/// GET /api/mood/today
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayMoodResponse {
    pub has_entry: bool,
    pub mood_entry: Option<MoodEntry>,
}

/// GET /api/mood/insights query params
#[derive(Debug, Deserialize, Validate)]
pub struct InsightsQuery {
    /// Window length in days. Default: 7
    #[validate(range(min = 0, max = 365, message = "Days must be between 0 and 365"))]
    pub days: Option<i64>,
}

// ============================================================================
// Activities
// ============================================================================

/// POST /api/activities/complete
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteActivityRequest {
    #[validate(length(max = 100, message = "Activity ID is too long"))]
    pub activity_id: Option<String>,

    #[validate(length(max = 2000, message = "Notes must be under 2000 characters"))]
    pub notes: Option<String>,
}

// ============================================================================
// Validation helpers
// ============================================================================

pub const DEFAULT_ENTRIES_LIMIT: i64 = 30;

impl LogMoodRequest {
    /// Mood is the one required field.
    pub fn into_fields(self) -> Result<MoodFields, String> {
        let mood = self.mood.ok_or("Mood must be between 1 and 10")?;
        Ok(MoodFields {
            mood,
            energy: self.energy,
            stress: self.stress,
            sleep: self.sleep,
            note: self.note,
        })
    }
}

impl CompleteActivityRequest {
    /// Trimmed activity id, rejecting blanks.
    pub fn activity_id(&self) -> Result<&str, String> {
        self.activity_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| "Activity ID is required".to_string())
    }
}
