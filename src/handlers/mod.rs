//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod health;
pub mod languages;
pub mod progress;
pub mod questions;
pub mod submissions;

use axum::{middleware, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/questions", questions::routes())
        .nest("/submissions", submissions::routes(state.clone()))
        .nest("/progress", progress::routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(languages::routes())
        .merge(protected)
}
