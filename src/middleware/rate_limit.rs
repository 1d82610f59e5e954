//! Per-user submission rate limiting
//!
//! Every graded submission costs execution-engine quota, so submissions are
//! counted per user in a fixed Redis window. The counter and its TTL are
//! read in one atomic pipeline.

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;
use tracing::{info, warn};

use crate::{error::AppError, middleware::auth::AuthenticatedUser, state::AppState};

fn bucket_key(user_id: &str) -> String {
    format!("rate_limit:submissions:{}", user_id)
}

/// Reject a submission once the caller has used up the current window
///
/// Runs after authentication. If Redis is unreachable the request is let
/// through.
pub async fn submission_rate_limit(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user) = request.extensions().get::<AuthenticatedUser>().cloned() else {
        return Err(AppError::Unauthorized);
    };

    let limits = &state.config().rate_limit;
    let key = bucket_key(&user.id);
    let mut redis = state.redis();

    let (count, ttl): (i64, i64) = match redis::pipe()
        .atomic()
        .incr(&key, 1)
        .ttl(&key)
        .query_async(&mut redis)
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            warn!(error = %e, "Rate limit check skipped, Redis unavailable");
            return Ok(next.run(request).await);
        }
    };

    // Fresh keys and keys that lost their expiry get a new window
    let ttl = if window_missing(ttl) {
        if let Err(e) = redis.expire::<_, ()>(&key, limits.window_secs).await {
            warn!(error = %e, "Failed to set rate limit window");
        }
        limits.window_secs
    } else {
        ttl
    };

    if count > limits.submissions_per_window {
        info!(user_id = %user.id, count, "Submission rate limit hit");
        return Err(AppError::TooManyRequests(ttl.max(1)));
    }

    Ok(next.run(request).await)
}

/// `TTL` answers -1 for a key without expiry and -2 for a missing key
fn window_missing(ttl: i64) -> bool {
    ttl < 0
}
