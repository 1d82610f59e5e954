//! Submission repository
//!
//! Submissions form an audit trail: there is no update or delete here.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{NewSubmission, Submission},
};

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Record a graded submission
    pub async fn create(pool: &PgPool, submission: &NewSubmission) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (
                user_id, question_id, code, language, status,
                avg_time_ms, avg_memory_kb, test_cases_passed, total_test_cases
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&submission.user_id)
        .bind(submission.question_id)
        .bind(&submission.code)
        .bind(submission.language.as_str())
        .bind(submission.status.as_str())
        .bind(submission.avg_time_ms)
        .bind(submission.avg_memory_kb)
        .bind(submission.test_cases_passed)
        .bind(submission.total_test_cases)
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }

    /// Find a submission by ID, only if made by `user_id`
    pub async fn find_for_owner(
        pool: &PgPool,
        id: &Uuid,
        user_id: &str,
    ) -> AppResult<Option<Submission>> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"SELECT * FROM submissions WHERE id = $1 AND user_id = $2"#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(submission)
    }

    /// List a user's submissions with pagination and filters
    pub async fn list_for_owner(
        pool: &PgPool,
        user_id: &str,
        question_id: Option<&Uuid>,
        status: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT * FROM submissions
            WHERE user_id = $1
                AND ($2::uuid IS NULL OR question_id = $2)
                AND ($3::text IS NULL OR status = $3)
            ORDER BY submitted_at DESC
            OFFSET $4 LIMIT $5
            "#,
        )
        .bind(user_id)
        .bind(question_id)
        .bind(status)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM submissions
            WHERE user_id = $1
                AND ($2::uuid IS NULL OR question_id = $2)
                AND ($3::text IS NULL OR status = $3)
            "#,
        )
        .bind(user_id)
        .bind(question_id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok((submissions, count))
    }
}
