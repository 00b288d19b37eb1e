use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One self-reported mood log per user per calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(rename = "entry_date")]
    pub date: NaiveDate,
    pub mood: i32,
    pub energy: Option<i32>,
    pub stress: Option<i32>,
    pub sleep: Option<i32>,
    pub note: Option<String>,
    #[sqlx(rename = "logged_at")]
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Values written by a mood log. `None` keeps whatever the day's entry
/// already holds.
#[derive(Debug, Clone, Default)]
pub struct MoodFields {
    pub mood: i32,
    pub energy: Option<i32>,
    pub stress: Option<i32>,
    pub sleep: Option<i32>,
    pub note: Option<String>,
}

impl MoodEntry {
    /// Applies a same-day re-log on top of this entry.
    pub fn merge(&mut self, fields: MoodFields, at: DateTime<Utc>) {
        self.mood = fields.mood;
        self.energy = fields.energy.or(self.energy);
        self.stress = fields.stress.or(self.stress);
        self.sleep = fields.sleep.or(self.sleep);
        self.note = fields.note.or(self.note.take());
        self.timestamp = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> MoodEntry {
        let now = Utc::now();
        MoodEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: now.date_naive(),
            mood: 4,
            energy: Some(2),
            stress: Some(5),
            sleep: None,
            note: Some("rough morning".into()),
            timestamp: now,
            created_at: now,
        }
    }

    #[test]
    fn merge_keeps_fields_that_were_not_resent() {
        let mut e = entry();
        let later = e.timestamp + chrono::Duration::hours(3);
        e.merge(
            MoodFields {
                mood: 7,
                sleep: Some(0),
                ..Default::default()
            },
            later,
        );

        assert_eq!(e.mood, 7);
        assert_eq!(e.energy, Some(2));
        assert_eq!(e.stress, Some(5));
        assert_eq!(e.sleep, Some(0));
        assert_eq!(e.note.as_deref(), Some("rough morning"));
        assert_eq!(e.timestamp, later);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(entry()).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("date").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
