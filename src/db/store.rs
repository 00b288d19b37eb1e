use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::activity::{ActivityCompletion, NewCompletion};
use crate::models::mood_entry::{MoodEntry, MoodFields};
use crate::models::range::DateRange;

/// Persistence boundary for mood entries and activity completions.
///
/// Implementations report an unreachable backend as an error; an empty
/// result always means "no rows".
#[async_trait]
pub trait Store: Send + Sync {
    /// Creates the (user, date) entry or updates it in place.
    async fn upsert_mood_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        fields: MoodFields,
    ) -> AppResult<MoodEntry>;

    /// Entries within `range`, newest date first.
    async fn mood_entries(
        &self,
        user_id: Uuid,
        range: DateRange,
        limit: Option<i64>,
    ) -> AppResult<Vec<MoodEntry>>;

    async fn mood_entry_on(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<MoodEntry>>;

    async fn completions(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> AppResult<Vec<ActivityCompletion>>;

    async fn append_completion(&self, completion: NewCompletion) -> AppResult<ActivityCompletion>;

    async fn ping(&self) -> AppResult<()>;
}
