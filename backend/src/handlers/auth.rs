//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use shared::User;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::auth::{AuthSession, LoginInput, RegisterInput};
use crate::services::AuthService;
use crate::AppState;

/// Register endpoint handler. Signs the new user in.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterInput>,
) -> AppResult<(StatusCode, Json<AuthSession>)> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let session = auth_service.register(body).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginInput>,
) -> AppResult<Json<AuthSession>> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let session = auth_service.login(body).await?;
    Ok(Json(session))
}

/// The signed-in user
pub async fn me(current_user: CurrentUser) -> Json<User> {
    Json(current_user.0.user)
}
