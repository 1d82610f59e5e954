//! Question handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_NUMBER, MAX_PAGE_SIZE},
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::QuestionService,
    state::AppState,
};

use super::{
    request::{ImportQuestionRequest, ListQuestionsQuery},
    response::{QuestionResponse, QuestionsListResponse},
};

/// Import a generated question for the caller
pub async fn import_question(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<ImportQuestionRequest>,
) -> AppResult<(StatusCode, Json<QuestionResponse>)> {
    payload.validate()?;

    let question = QuestionService::import_question(state.db(), &auth_user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(question)))
}

/// List the caller's questions (paginated)
pub async fn list_questions(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListQuestionsQuery>,
) -> AppResult<Json<QuestionsListResponse>> {
    let page = query.page.unwrap_or(1).clamp(1, MAX_PAGE_NUMBER);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    let (questions, total) = QuestionService::list_questions(
        state.db(),
        &auth_user.id,
        query.difficulty.as_deref(),
        page,
        per_page,
    )
    .await?;

    Ok(Json(QuestionsListResponse {
        questions,
        total,
        page,
        per_page,
    }))
}

/// Get one of the caller's questions
pub async fn get_question(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<QuestionResponse>> {
    let question = QuestionService::get_question(state.db(), &id, &auth_user.id).await?;
    Ok(Json(question))
}

/// Delete one of the caller's questions
pub async fn delete_question(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    QuestionService::delete_question(state.db(), &id, &auth_user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
