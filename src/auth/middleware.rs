use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use uuid::Uuid;

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::AppState;

/// Identity resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
}

pub async fn require_auth(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::Unauthorized)?;

    let token_data = verify_token(bearer.token(), &state.config.jwt_secret)?;
    let claims = token_data.claims;

    let auth_user = AuthUser {
        id: claims.sub,
        email: if claims.email.is_empty() {
            None
        } else {
            Some(claims.email)
        },
        name: claims.name,
    };

    tracing::debug!(user_id = %auth_user.id, "Authenticated request");

    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}
