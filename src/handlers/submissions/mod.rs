//! Submission handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{middleware::rate_limit::submission_rate_limit, state::AppState};

/// Submission routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handler::create_submission)
                .route_layer(middleware::from_fn_with_state(state, submission_rate_limit)),
        )
        .route("/", get(handler::list_submissions))
        .route("/{id}", get(handler::get_submission))
}
