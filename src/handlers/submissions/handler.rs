//! Submission handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_NUMBER, MAX_PAGE_SIZE},
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::{
        submission_service::{RequestScope, SubmitRequest},
        SubmissionService,
    },
    state::AppState,
};

use super::{
    request::{CreateSubmissionRequest, ListSubmissionsQuery},
    response::{CreateSubmissionResponse, SubmissionDetailResponse, SubmissionsListResponse},
};

/// Grade code against the question's test cases
///
/// Grading runs on its own task so that engine calls already in flight
/// finish even if the client disconnects; the result is then discarded
/// instead of recorded.
pub async fn create_submission(
    State(service): State<SubmissionService>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateSubmissionRequest>,
) -> AppResult<(StatusCode, Json<CreateSubmissionResponse>)> {
    let request = SubmitRequest {
        user_id: auth_user.id,
        question_id: payload.question_id,
        code: payload.code,
        language: payload.language,
    };

    let (guard, scope) = RequestScope::new();
    let task = tokio::spawn(async move { service.submit(request, scope).await });

    let outcome = task
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("grading task failed: {}", e)))??;
    drop(guard);

    let status = if outcome.recorded() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome.into())))
}

/// List the caller's submissions (paginated)
pub async fn list_submissions(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListSubmissionsQuery>,
) -> AppResult<Json<SubmissionsListResponse>> {
    let page = query.page.unwrap_or(1).clamp(1, MAX_PAGE_NUMBER);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    let (submissions, total) = SubmissionService::list_submissions(
        state.db(),
        &auth_user.id,
        query.question_id.as_ref(),
        query.status.as_deref(),
        page,
        per_page,
    )
    .await?;

    Ok(Json(SubmissionsListResponse {
        submissions,
        total,
        page,
        per_page,
    }))
}

/// Get one of the caller's submissions, including its source
pub async fn get_submission(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionDetailResponse>> {
    let submission = SubmissionService::get_submission(state.db(), &id, &auth_user.id).await?;
    Ok(Json(submission.into()))
}
