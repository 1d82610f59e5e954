//! Question service

use std::collections::BTreeMap;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::QuestionRepository,
    error::{AppError, AppResult},
    handlers::questions::{
        request::ImportQuestionRequest,
        response::{QuestionResponse, QuestionSummary},
    },
    judge::languages::Language,
    models::{Difficulty, NewQuestion},
    utils::validation::{self, normalize_labels, sanitize_string},
};

/// Question service for business logic
pub struct QuestionService;

impl QuestionService {
    /// Store a generated question for `user_id`
    pub async fn import_question(
        pool: &PgPool,
        user_id: &str,
        payload: ImportQuestionRequest,
    ) -> AppResult<QuestionResponse> {
        let new_question = Self::to_new_question(user_id, payload)?;
        let question = QuestionRepository::create(pool, &new_question).await?;

        info!(
            question_id = %question.id,
            user_id = %user_id,
            difficulty = %question.difficulty,
            test_cases = question.test_cases.len(),
            "Question imported"
        );

        Ok(question.into())
    }

    /// Get a question owned by `user_id`
    pub async fn get_question(pool: &PgPool, id: &Uuid, user_id: &str) -> AppResult<QuestionResponse> {
        QuestionRepository::find_for_owner(pool, id, user_id)
            .await?
            .map(QuestionResponse::from)
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))
    }

    /// List questions owned by `user_id`
    pub async fn list_questions(
        pool: &PgPool,
        user_id: &str,
        difficulty: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> AppResult<(Vec<QuestionSummary>, i64)> {
        let difficulty = difficulty
            .map(|d| {
                Difficulty::from_str(&d.to_lowercase())
                    .ok_or_else(|| AppError::Validation(format!("Unknown difficulty: {}", d)))
            })
            .transpose()?;

        let offset = validation::page_offset(page, per_page);
        let (questions, total) = QuestionRepository::list_for_owner(
            pool,
            user_id,
            difficulty.map(|d| d.as_str()),
            offset,
            per_page as i64,
        )
        .await?;

        Ok((questions.into_iter().map(QuestionSummary::from).collect(), total))
    }

    /// Delete a question owned by `user_id`
    ///
    /// Past submissions for the question are kept.
    pub async fn delete_question(pool: &PgPool, id: &Uuid, user_id: &str) -> AppResult<()> {
        if !QuestionRepository::delete_for_owner(pool, id, user_id).await? {
            return Err(AppError::NotFound("Question not found".to_string()));
        }

        info!(question_id = %id, user_id = %user_id, "Question deleted");
        Ok(())
    }

    fn to_new_question(user_id: &str, payload: ImportQuestionRequest) -> AppResult<NewQuestion> {
        let difficulty = Difficulty::from_str(&payload.difficulty.trim().to_lowercase())
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "difficulty must be easy, medium or hard, got '{}'",
                    payload.difficulty
                ))
            })?;

        let title = sanitize_string(&payload.title);
        if title.is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }

        if payload.test_cases.is_empty() {
            return Err(AppError::Validation(
                "A question needs at least one test case".to_string(),
            ));
        }

        let mut starter_code = BTreeMap::new();
        for (language, code) in payload.starter_code {
            let language = Language::resolve(&language)
                .map_err(|e| AppError::Validation(format!("starterCode: {}", e)))?;
            starter_code.insert(language, code);
        }

        Ok(NewQuestion {
            user_id: user_id.to_string(),
            title,
            description: payload.description,
            difficulty,
            category: sanitize_string(&payload.category).to_lowercase(),
            constraints: payload.constraints,
            examples: payload.examples,
            test_cases: payload.test_cases,
            starter_code,
            hints: payload.hints,
            tags: normalize_labels(&payload.tags),
            time_complexity: payload.time_complexity,
            space_complexity: payload.space_complexity,
        })
    }
}
