//! In-process fakes for the storage and engine seams

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    db::GradingStore,
    error::{AppError, AppResult},
    judge::engine::{EngineError, EngineReply, EngineRequest, ExecutionEngine},
    models::{Difficulty, NewSubmission, Question, Submission, TestCase, UserProgress},
};

pub fn test_case(input: &str, expected_output: &str) -> TestCase {
    TestCase {
        input: input.to_string(),
        expected_output: expected_output.to_string(),
        is_hidden: false,
    }
}

pub fn question(owner: &str, difficulty: Difficulty, test_cases: Vec<TestCase>) -> Question {
    Question {
        id: Uuid::new_v4(),
        user_id: owner.to_string(),
        title: "Echo".to_string(),
        description: "Print the input back".to_string(),
        difficulty,
        category: "strings".to_string(),
        constraints: None,
        examples: Vec::new(),
        test_cases,
        starter_code: BTreeMap::new(),
        hints: Vec::new(),
        tags: Vec::new(),
        time_complexity: None,
        space_complexity: None,
        created_at: Utc::now(),
    }
}

/// [`GradingStore`] backed by hash maps
#[derive(Default)]
pub struct InMemoryStore {
    questions: Mutex<HashMap<Uuid, Question>>,
    submissions: Mutex<Vec<Submission>>,
    progress: Mutex<HashMap<String, UserProgress>>,
    fail_inserts: AtomicBool,
    fail_progress: AtomicBool,
}

impl InMemoryStore {
    pub fn add_question(&self, question: Question) -> Uuid {
        let id = question.id;
        self.questions.lock().unwrap().insert(id, question);
        id
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn progress(&self, user_id: &str) -> Option<UserProgress> {
        self.progress.lock().unwrap().get(user_id).cloned()
    }

    pub fn fail_submission_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    pub fn fail_progress_updates(&self) {
        self.fail_progress.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl GradingStore for InMemoryStore {
    async fn find_question(&self, id: &Uuid, owner_id: &str) -> AppResult<Option<Question>> {
        Ok(self
            .questions
            .lock()
            .unwrap()
            .get(id)
            .filter(|q| q.user_id == owner_id)
            .cloned())
    }

    async fn insert_submission(&self, new: &NewSubmission) -> AppResult<Submission> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Database("connection reset".to_string()));
        }

        let submission = Submission {
            id: Uuid::new_v4(),
            user_id: new.user_id.clone(),
            question_id: new.question_id,
            code: new.code.clone(),
            language: new.language.as_str().to_string(),
            status: new.status.as_str().to_string(),
            avg_time_ms: new.avg_time_ms,
            avg_memory_kb: new.avg_memory_kb,
            test_cases_passed: new.test_cases_passed,
            total_test_cases: new.total_test_cases,
            submitted_at: Utc::now(),
        };
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(submission)
    }

    async fn record_solved(
        &self,
        user_id: &str,
        difficulty: Difficulty,
        at: DateTime<Utc>,
    ) -> AppResult<UserProgress> {
        if self.fail_progress.load(Ordering::SeqCst) {
            return Err(AppError::Database("deadlock detected".to_string()));
        }

        let mut rows = self.progress.lock().unwrap();
        let row = rows
            .entry(user_id.to_string())
            .or_insert_with(|| UserProgress::fresh(user_id, at));
        row.record_solved(difficulty, at);
        Ok(row.clone())
    }
}

type DelayFn = Box<dyn Fn(&str) -> Duration + Send + Sync>;

/// Engine whose answers are decided by the test input
///
/// By default every run "finishes" and prints its stdin back.
pub struct ScriptedEngine {
    status_id: u32,
    failures: HashMap<String, u32>,
    unreachable: HashMap<String, String>,
    delay: Option<DelayFn>,
    calls: AtomicUsize,
}

impl ScriptedEngine {
    pub fn echo() -> Self {
        Self::with_status(3)
    }

    /// Every run ends with the given Judge0 status
    pub fn with_status(status_id: u32) -> Self {
        Self {
            status_id,
            failures: HashMap::new(),
            unreachable: HashMap::new(),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay_by_input(
        mut self,
        delay: impl Fn(&str) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }

    pub fn fail_input_with(mut self, input: &str, status_id: u32) -> Self {
        self.failures.insert(input.to_string(), status_id);
        self
    }

    /// Runs with this input fail at the transport level
    pub fn unreachable_for(mut self, input: &str) -> Self {
        self.unreachable
            .insert(input.to_string(), "connection refused".to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExecutionEngine for ScriptedEngine {
    async fn submit(&self, request: &EngineRequest) -> Result<EngineReply, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(&request.stdin)).await;
        }

        if let Some(reason) = self.unreachable.get(&request.stdin) {
            return Err(EngineError::Transport(reason.clone()));
        }

        let status_id = self
            .failures
            .get(&request.stdin)
            .copied()
            .unwrap_or(self.status_id);

        let reply = match status_id {
            3 | 4 => EngineReply {
                status_id,
                status_description: "Accepted".to_string(),
                stdout: Some(format!("{}\n", request.stdin)),
                time_ms: Some(10.0),
                memory_kb: Some(1024.0),
                ..Default::default()
            },
            6 => EngineReply {
                status_id,
                status_description: "Compilation Error".to_string(),
                compile_output: Some("main.cpp:1:10: error: expected ')'".to_string()),
                ..Default::default()
            },
            _ => EngineReply {
                status_id,
                status_description: "Runtime Error".to_string(),
                stderr: Some("Segmentation fault".to_string()),
                time_ms: Some(2.0),
                memory_kb: Some(512.0),
                ..Default::default()
            },
        };
        Ok(reply)
    }
}

/// Engine that takes longer than any sensible timeout
pub struct SlowEngine {
    delay: Duration,
}

impl SlowEngine {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ExecutionEngine for SlowEngine {
    async fn submit(&self, request: &EngineRequest) -> Result<EngineReply, EngineError> {
        tokio::time::sleep(self.delay).await;
        Ok(EngineReply {
            status_id: 3,
            stdout: Some(request.stdin.clone()),
            ..Default::default()
        })
    }
}
