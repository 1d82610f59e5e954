//! Progress handlers

use axum::{extract::State, routing::get, Json, Router};

use crate::{
    error::AppResult, middleware::auth::AuthenticatedUser, models::UserProgress,
    services::ProgressService, state::AppState,
};

/// The caller's solved counters and skill level
pub async fn get_progress(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<UserProgress>> {
    let progress = ProgressService::get_progress(state.db(), &auth_user.id).await?;
    Ok(Json(progress))
}

/// Progress routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_progress))
}
