//! Question repository
//!
//! Every read and delete is scoped to the owning user; a question owned by
//! someone else is indistinguishable from a missing one.

use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{NewQuestion, Question, QuestionRow},
};

/// Repository for question database operations
pub struct QuestionRepository;

impl QuestionRepository {
    /// Insert a generated question
    pub async fn create(pool: &PgPool, question: &NewQuestion) -> AppResult<Question> {
        let starter_code: std::collections::BTreeMap<String, String> = question
            .starter_code
            .iter()
            .map(|(lang, code)| (lang.as_str().to_string(), code.clone()))
            .collect();

        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            INSERT INTO questions (
                user_id, title, description, difficulty, category, constraints,
                examples, test_cases, starter_code, hints, tags,
                time_complexity, space_complexity
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&question.user_id)
        .bind(&question.title)
        .bind(&question.description)
        .bind(question.difficulty.as_str())
        .bind(&question.category)
        .bind(&question.constraints)
        .bind(Json(&question.examples))
        .bind(Json(&question.test_cases))
        .bind(Json(&starter_code))
        .bind(&question.hints)
        .bind(&question.tags)
        .bind(&question.time_complexity)
        .bind(&question.space_complexity)
        .fetch_one(pool)
        .await?;

        row.try_into()
    }

    /// Find a question by ID, only if owned by `user_id`
    pub async fn find_for_owner(
        pool: &PgPool,
        id: &Uuid,
        user_id: &str,
    ) -> AppResult<Option<Question>> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"SELECT * FROM questions WHERE id = $1 AND user_id = $2"#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        row.map(Question::try_from).transpose()
    }

    /// List a user's questions, newest first
    pub async fn list_for_owner(
        pool: &PgPool,
        user_id: &str,
        difficulty: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Question>, i64)> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT * FROM questions
            WHERE user_id = $1
                AND ($2::text IS NULL OR difficulty = $2)
            ORDER BY created_at DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(difficulty)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM questions
            WHERE user_id = $1
                AND ($2::text IS NULL OR difficulty = $2)
            "#,
        )
        .bind(user_id)
        .bind(difficulty)
        .fetch_one(pool)
        .await?;

        let questions = rows
            .into_iter()
            .map(Question::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((questions, count))
    }

    /// Delete a question owned by `user_id`. Returns whether a row was removed.
    pub async fn delete_for_owner(pool: &PgPool, id: &Uuid, user_id: &str) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM questions WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
