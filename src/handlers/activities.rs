use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use chrono::Utc;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{CompleteActivityRequest, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::models::activity::{NewCompletion, TodayActivity};
use crate::models::range::DateRange;
use crate::services::recommender::{ActivityRecommender, RECENT_MOOD_ENTRIES};
use crate::AppState;

pub async fn todays_activities(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<TodayActivity>>> {
    let today = Utc::now().date_naive();

    let recent = state
        .store
        .mood_entries(
            auth_user.id,
            DateRange::unbounded(),
            Some(RECENT_MOOD_ENTRIES as i64),
        )
        .await?;
    let completions = state
        .store
        .completions(auth_user.id, ActivityRecommender::recency_window(today))
        .await?;

    let activities = state
        .recommender
        .todays_activities(&recent, &completions, today);

    Ok(Json(activities))
}

pub async fn complete_activity(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    body: Result<Json<CompleteActivityRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(body) = body?;
    body.validate()?;
    let activity_id = body.activity_id().map_err(AppError::Validation)?.to_string();

    // Ids outside the catalog are still recorded.
    if !state.recommender.contains(&activity_id) {
        tracing::warn!(user_id = %auth_user.id, activity_id = %activity_id, "Completion for unknown activity");
    }

    let today = Utc::now().date_naive();
    let completion = state
        .store
        .append_completion(NewCompletion {
            user_id: auth_user.id,
            activity_id,
            date: today,
            notes: body.notes.unwrap_or_default(),
        })
        .await?;

    tracing::info!(
        user_id = %auth_user.id,
        activity_id = %completion.activity_id,
        date = %completion.date,
        "Activity completed"
    );

    Ok(Json(MessageResponse::new("Activity marked as completed")))
}
