use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Extension, Json,
};
use chrono::Utc;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{
    InsightsQuery, LogMoodRequest, LogMoodResponse, MoodEntriesQuery, TodayMoodResponse,
    DEFAULT_ENTRIES_LIMIT,
};
use crate::error::{AppError, AppResult};
use crate::models::insight::MoodInsight;
use crate::models::mood_entry::MoodEntry;
use crate::models::range::DateRange;
use crate::services::insights::{calculate_insights, DEFAULT_WINDOW_DAYS};
use crate::AppState;

pub async fn log_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    body: Result<Json<LogMoodRequest>, JsonRejection>,
) -> AppResult<Json<LogMoodResponse>> {
    let Json(body) = body?;
    body.validate()?;
    let fields = body.into_fields().map_err(AppError::Validation)?;

    let today = Utc::now().date_naive();
    let entry = state
        .store
        .upsert_mood_entry(auth_user.id, today, fields)
        .await?;

    tracing::info!(user_id = %auth_user.id, date = %today, mood = entry.mood, "Mood entry saved");

    Ok(Json(LogMoodResponse {
        message: "Mood entry saved successfully".into(),
        mood_entry: entry,
    }))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    query: Result<Query<MoodEntriesQuery>, QueryRejection>,
) -> AppResult<Json<Vec<MoodEntry>>> {
    let Query(query) = query?;
    query.validate()?;

    let range = DateRange::new(query.start_date, query.end_date);
    let limit = query.limit.unwrap_or(DEFAULT_ENTRIES_LIMIT);

    let entries = state
        .store
        .mood_entries(auth_user.id, range, Some(limit))
        .await?;

    Ok(Json(entries))
}

pub async fn todays_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<TodayMoodResponse>> {
    let today = Utc::now().date_naive();
    let entry = state.store.mood_entry_on(auth_user.id, today).await?;

    Ok(Json(TodayMoodResponse {
        has_entry: entry.is_some(),
        mood_entry: entry,
    }))
}

pub async fn get_insights(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    query: Result<Query<InsightsQuery>, QueryRejection>,
) -> AppResult<Json<MoodInsight>> {
    let Query(query) = query?;
    query.validate()?;

    let days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    let today = Utc::now().date_naive();

    let entries = state
        .store
        .mood_entries(auth_user.id, DateRange::trailing_days(today, days), None)
        .await?;

    let insight = calculate_insights(&entries, today);

    tracing::debug!(
        user_id = %auth_user.id,
        days,
        total_entries = insight.total_entries,
        trend = ?insight.mood_trend,
        "Computed mood insights"
    );

    Ok(Json(insight))
}
