use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use chrono::{Duration, NaiveDate, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

use moodbuddy_api::auth::jwt::Claims;
use moodbuddy_api::config::Config;
use moodbuddy_api::db::Store;
use moodbuddy_api::error::{AppError, AppResult};
use moodbuddy_api::models::activity::{ActivityCompletion, NewCompletion};
use moodbuddy_api::models::mood_entry::{MoodEntry, MoodFields};
use moodbuddy_api::models::range::DateRange;
use moodbuddy_api::services::catalog::default_catalog;
use moodbuddy_api::services::recommender::ActivityRecommender;
use moodbuddy_api::{build_router, AppState};

pub const JWT_SECRET: &str = "test-secret";

/// In-memory store mirroring the Postgres upsert and ordering rules.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<MoodEntry>>,
    completions: Mutex<Vec<ActivityCompletion>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Unavailable("memory store offline".into()));
        }
        Ok(())
    }

    pub async fn seed_entry(&self, user_id: Uuid, date: NaiveDate, mood: i32) {
        let now = Utc::now();
        self.entries.lock().await.push(MoodEntry {
            id: Uuid::new_v4(),
            user_id,
            date,
            mood,
            energy: None,
            stress: None,
            sleep: None,
            note: None,
            timestamp: now,
            created_at: now,
        });
    }

    pub async fn seed_completion(&self, user_id: Uuid, activity_id: &str, date: NaiveDate) {
        self.completions.lock().await.push(ActivityCompletion {
            id: Uuid::new_v4(),
            user_id,
            activity_id: activity_id.into(),
            date,
            notes: String::new(),
            completed_at: Utc::now(),
        });
    }

    pub async fn entry_count(&self, user_id: Uuid) -> usize {
        self.entries
            .lock()
            .await
            .iter()
            .filter(|e| e.user_id == user_id)
            .count()
    }

    pub async fn completions_for(&self, user_id: Uuid) -> Vec<ActivityCompletion> {
        self.completions
            .lock()
            .await
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn upsert_mood_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        fields: MoodFields,
    ) -> AppResult<MoodEntry> {
        self.check()?;
        let mut entries = self.entries.lock().await;
        let now = Utc::now();

        if let Some(existing) = entries
            .iter_mut()
            .find(|e| e.user_id == user_id && e.date == date)
        {
            existing.merge(fields, now);
            return Ok(existing.clone());
        }

        let entry = MoodEntry {
            id: Uuid::new_v4(),
            user_id,
            date,
            mood: fields.mood,
            energy: fields.energy,
            stress: fields.stress,
            sleep: fields.sleep,
            note: fields.note,
            timestamp: now,
            created_at: now,
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn mood_entries(
        &self,
        user_id: Uuid,
        range: DateRange,
        limit: Option<i64>,
    ) -> AppResult<Vec<MoodEntry>> {
        self.check()?;
        let mut found: Vec<MoodEntry> = self
            .entries
            .lock()
            .await
            .iter()
            .filter(|e| e.user_id == user_id && range.contains(e.date))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(limit) = limit {
            found.truncate(limit as usize);
        }
        Ok(found)
    }

    async fn mood_entry_on(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<MoodEntry>> {
        self.check()?;
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .find(|e| e.user_id == user_id && e.date == date)
            .cloned())
    }

    async fn completions(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> AppResult<Vec<ActivityCompletion>> {
        self.check()?;
        Ok(self
            .completions
            .lock()
            .await
            .iter()
            .filter(|c| c.user_id == user_id && range.contains(c.date))
            .cloned()
            .collect())
    }

    async fn append_completion(&self, completion: NewCompletion) -> AppResult<ActivityCompletion> {
        self.check()?;
        let row = ActivityCompletion {
            id: Uuid::new_v4(),
            user_id: completion.user_id,
            activity_id: completion.activity_id,
            date: completion.date,
            notes: completion.notes,
            completed_at: Utc::now(),
        };
        self.completions.lock().await.push(row.clone());
        Ok(row)
    }

    async fn ping(&self) -> AppResult<()> {
        self.check()
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".into(),
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: "http://localhost:3000".into(),
        cors_extra_origins: vec![],
        jwt_secret: JWT_SECRET.into(),
        activity_catalog_path: None,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub fn setup_app() -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::new(
        store.clone(),
        Arc::new(test_config()),
        ActivityRecommender::new(default_catalog()),
    );
    TestApp {
        router: build_router(state),
        store,
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn days_ago(n: i64) -> NaiveDate {
    today() - Duration::days(n)
}

pub fn token_for(user_id: Uuid) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: "tester@example.com".into(),
        name: Some("Tester".into()),
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn authed_request(
    method: &str,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &TestApp, req: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(req).await.unwrap()
}

pub async fn json_body(res: Response<Body>) -> serde_json::Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
