//! Storage seam used by the grading pipeline

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{ProgressRepository, QuestionRepository, SubmissionRepository},
    error::AppResult,
    models::{Difficulty, NewSubmission, Question, Submission, UserProgress},
};

/// Persistence the submission pipeline depends on
#[async_trait]
pub trait GradingStore: Send + Sync {
    /// Question by id, `None` if missing or owned by someone else
    async fn find_question(&self, id: &Uuid, owner_id: &str) -> AppResult<Option<Question>>;

    async fn insert_submission(&self, submission: &NewSubmission) -> AppResult<Submission>;

    /// Atomically count one solved question for the user
    async fn record_solved(
        &self,
        user_id: &str,
        difficulty: Difficulty,
        at: DateTime<Utc>,
    ) -> AppResult<UserProgress>;
}

/// Postgres-backed [`GradingStore`]
#[derive(Clone)]
pub struct PgGradingStore {
    pool: PgPool,
}

impl PgGradingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GradingStore for PgGradingStore {
    async fn find_question(&self, id: &Uuid, owner_id: &str) -> AppResult<Option<Question>> {
        QuestionRepository::find_for_owner(&self.pool, id, owner_id).await
    }

    async fn insert_submission(&self, submission: &NewSubmission) -> AppResult<Submission> {
        SubmissionRepository::create(&self.pool, submission).await
    }

    async fn record_solved(
        &self,
        user_id: &str,
        difficulty: Difficulty,
        at: DateTime<Utc>,
    ) -> AppResult<UserProgress> {
        ProgressRepository::record_solved(&self.pool, user_id, difficulty, at).await
    }
}
