//! Submission service
//!
//! Grades a submission end to end: validate, load the caller's question,
//! run every test case, record the attempt and, when everything passed,
//! advance the caller's progress.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::oneshot;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    config::EngineConfig,
    db::{repositories::SubmissionRepository, GradingStore},
    error::{AppError, AppResult},
    judge::{
        aggregator::{AggregateResult, Aggregator, TestSuite},
        engine::ExecutionEngine,
        languages::Language,
        runner::TestCaseRunner,
    },
    models::{Difficulty, NewSubmission, Submission, UserProgress},
    services::progress_service::ProgressUpdater,
    utils::validation,
};

/// A grading request as received from the caller
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub user_id: String,
    pub question_id: String,
    pub code: String,
    pub language: String,
}

/// A request whose fields have all been checked
#[derive(Debug, Clone)]
struct ValidatedRequest {
    user_id: String,
    question_id: Uuid,
    code: String,
    language: Language,
}

impl SubmitRequest {
    fn validate(self) -> AppResult<ValidatedRequest> {
        validation::require_non_empty("userId", &self.user_id).map_err(AppError::Validation)?;
        validation::require_non_empty("questionId", &self.question_id)
            .map_err(AppError::Validation)?;
        validation::validate_source_code(&self.code)
            .map_err(|e| AppError::Validation(format!("code: {}", e)))?;
        let language = Language::resolve(&self.language)
            .map_err(|e| AppError::Validation(format!("language: {}", e)))?;
        let question_id =
            validation::parse_id("questionId", &self.question_id).map_err(AppError::Validation)?;

        Ok(ValidatedRequest {
            user_id: self.user_id.trim().to_string(),
            question_id,
            code: self.code,
            language,
        })
    }
}

/// Tells the pipeline whether anyone is still waiting for the result
///
/// The caller keeps the matching [`CallerGuard`]; dropping it (for example
/// because the HTTP connection went away) cancels the scope.
#[derive(Debug)]
pub struct RequestScope {
    caller: Option<oneshot::Receiver<()>>,
}

/// Held by the caller for as long as it waits on a [`RequestScope`]
#[derive(Debug)]
pub struct CallerGuard {
    _alive: oneshot::Sender<()>,
}

impl RequestScope {
    pub fn new() -> (CallerGuard, Self) {
        let (tx, rx) = oneshot::channel();
        (CallerGuard { _alive: tx }, Self { caller: Some(rx) })
    }

    /// A scope that is never cancelled
    pub fn detached() -> Self {
        Self { caller: None }
    }

    pub fn is_cancelled(&mut self) -> bool {
        match self.caller.as_mut() {
            Some(rx) => matches!(rx.try_recv(), Err(oneshot::error::TryRecvError::Closed)),
            None => false,
        }
    }
}

/// A problem that did not change the grading result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeWarning {
    /// Graded, but the submission record could not be stored
    NotRecorded(String),
    /// Recorded, but progress counters were not advanced
    ProgressNotUpdated(String),
}

impl OutcomeWarning {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotRecorded(_) => "submission_not_recorded",
            Self::ProgressNotUpdated(_) => "progress_not_updated",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotRecorded(m) | Self::ProgressNotUpdated(m) => m,
        }
    }
}

/// Everything the caller learns about one graded submission
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    /// `None` when grading succeeded but the record could not be stored
    pub submission: Option<Submission>,
    pub aggregate: AggregateResult,
    pub difficulty: Difficulty,
    /// Updated progress, present only when the submission solved the question
    pub progress: Option<UserProgress>,
    pub warnings: Vec<OutcomeWarning>,
}

impl SubmissionOutcome {
    pub fn recorded(&self) -> bool {
        self.submission.is_some()
    }
}

/// Submission orchestrator
#[derive(Clone)]
pub struct SubmissionService {
    store: Arc<dyn GradingStore>,
    aggregator: Aggregator,
    progress: ProgressUpdater,
}

impl SubmissionService {
    pub fn new(
        store: Arc<dyn GradingStore>,
        engine: Arc<dyn ExecutionEngine>,
        engine_config: &EngineConfig,
    ) -> Self {
        let runner = TestCaseRunner::new(engine, engine_config.timeout);
        Self {
            aggregator: Aggregator::new(runner, engine_config.max_concurrency),
            progress: ProgressUpdater::new(store.clone()),
            store,
        }
    }

    /// Grade a submission
    #[instrument(skip_all, fields(user_id = %request.user_id, question_id = %request.question_id))]
    pub async fn submit(
        &self,
        request: SubmitRequest,
        mut scope: RequestScope,
    ) -> AppResult<SubmissionOutcome> {
        let request = request.validate()?;

        let question = self
            .store
            .find_question(&request.question_id, &request.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

        let suite = TestSuite::new(question.test_cases.clone()).ok_or_else(|| {
            AppError::Validation("Question has no test cases to grade against".to_string())
        })?;

        info!(
            language = %request.language,
            code_bytes = request.code.len(),
            test_cases = suite.len(),
            "Evaluating submission"
        );

        let aggregate = self
            .aggregator
            .evaluate(&request.code, request.language, &suite)
            .await;

        if scope.is_cancelled() {
            warn!(status = %aggregate.status, "Caller went away, discarding result");
            return Err(AppError::Cancelled);
        }

        if aggregate.engine_failed_everywhere() {
            let reason = aggregate
                .results
                .iter()
                .find_map(|r| r.error.clone())
                .unwrap_or_else(|| "no test case could be executed".to_string());
            return Err(AppError::EngineUnavailable(reason));
        }

        let new_submission = NewSubmission {
            user_id: request.user_id.clone(),
            question_id: question.id,
            code: request.code,
            language: request.language,
            status: aggregate.status,
            avg_time_ms: aggregate.avg_time_ms,
            avg_memory_kb: aggregate.avg_memory_kb,
            test_cases_passed: aggregate.passed as i32,
            total_test_cases: aggregate.total as i32,
        };

        let mut warnings = Vec::new();

        let submission = match self.store.insert_submission(&new_submission).await {
            Ok(submission) => Some(submission),
            Err(e) => {
                error!(error = %e, status = %aggregate.status, "Graded submission could not be recorded");
                warnings.push(OutcomeWarning::NotRecorded(
                    "The result was graded but could not be saved".to_string(),
                ));
                None
            }
        };

        let mut progress = None;
        if aggregate.all_passed() {
            if submission.is_some() {
                match self
                    .progress
                    .record_solved(&request.user_id, question.difficulty)
                    .await
                {
                    Ok(updated) => progress = Some(updated),
                    Err(e) => {
                        warn!(error = %e, "Progress update failed after accepted submission");
                        warnings.push(OutcomeWarning::ProgressNotUpdated(
                            "Solved, but progress could not be updated".to_string(),
                        ));
                    }
                }
            } else {
                warnings.push(OutcomeWarning::ProgressNotUpdated(
                    "Progress is only updated for recorded submissions".to_string(),
                ));
            }
        }

        info!(
            status = %aggregate.status,
            passed = aggregate.passed,
            total = aggregate.total,
            recorded = submission.is_some(),
            "Submission graded"
        );

        Ok(SubmissionOutcome {
            submission,
            aggregate,
            difficulty: question.difficulty,
            progress,
            warnings,
        })
    }

    /// Get one of the caller's submissions
    pub async fn get_submission(pool: &PgPool, id: &Uuid, user_id: &str) -> AppResult<Submission> {
        SubmissionRepository::find_for_owner(pool, id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))
    }

    /// List the caller's submissions
    pub async fn list_submissions(
        pool: &PgPool,
        user_id: &str,
        question_id: Option<&Uuid>,
        status: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let offset = validation::page_offset(page, per_page);
        let limit = per_page as i64;

        SubmissionRepository::list_for_owner(pool, user_id, question_id, status, offset, limit).await
    }
}
