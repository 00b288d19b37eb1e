use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::store::Store;
use crate::error::AppResult;
use crate::models::activity::{ActivityCompletion, NewCompletion};
use crate::models::mood_entry::{MoodEntry, MoodFields};
use crate::models::range::DateRange;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn upsert_mood_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        fields: MoodFields,
    ) -> AppResult<MoodEntry> {
        let entry = sqlx::query_as::<_, MoodEntry>(
            r#"
            INSERT INTO mood_entries (id, user_id, entry_date, mood, energy, stress, sleep, note)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, entry_date) DO UPDATE SET
                mood = EXCLUDED.mood,
                energy = COALESCE(EXCLUDED.energy, mood_entries.energy),
                stress = COALESCE(EXCLUDED.stress, mood_entries.stress),
                sleep = COALESCE(EXCLUDED.sleep, mood_entries.sleep),
                note = COALESCE(EXCLUDED.note, mood_entries.note),
                logged_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(date)
        .bind(fields.mood)
        .bind(fields.energy)
        .bind(fields.stress)
        .bind(fields.sleep)
        .bind(&fields.note)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn mood_entries(
        &self,
        user_id: Uuid,
        range: DateRange,
        limit: Option<i64>,
    ) -> AppResult<Vec<MoodEntry>> {
        let entries = sqlx::query_as::<_, MoodEntry>(
            r#"
            SELECT * FROM mood_entries
            WHERE user_id = $1
              AND ($2::date IS NULL OR entry_date >= $2)
              AND ($3::date IS NULL OR entry_date <= $3)
            ORDER BY entry_date DESC
            LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(range.start)
        .bind(range.end)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn mood_entry_on(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<MoodEntry>> {
        let entry = sqlx::query_as::<_, MoodEntry>(
            "SELECT * FROM mood_entries WHERE user_id = $1 AND entry_date = $2",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn completions(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> AppResult<Vec<ActivityCompletion>> {
        let completions = sqlx::query_as::<_, ActivityCompletion>(
            r#"
            SELECT * FROM activity_completions
            WHERE user_id = $1
              AND ($2::date IS NULL OR completed_on >= $2)
              AND ($3::date IS NULL OR completed_on <= $3)
            ORDER BY completed_at DESC
            "#,
        )
        .bind(user_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(completions)
    }

    async fn append_completion(&self, completion: NewCompletion) -> AppResult<ActivityCompletion> {
        let row = sqlx::query_as::<_, ActivityCompletion>(
            r#"
            INSERT INTO activity_completions (id, user_id, activity_id, completed_on, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(completion.user_id)
        .bind(&completion.activity_id)
        .bind(completion.date)
        .bind(&completion.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
