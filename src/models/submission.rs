//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::judge::languages::Language;

/// Submission database model. Rows are append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub user_id: String,
    pub question_id: Uuid,
    #[serde(skip_serializing)]
    pub code: String,
    pub language: String,
    pub status: String,
    pub avg_time_ms: f64,
    pub avg_memory_kb: f64,
    pub test_cases_passed: i32,
    pub total_test_cases: i32,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn verdict(&self) -> Option<Verdict> {
        Verdict::from_str(&self.status)
    }
}

/// Values for a submission about to be inserted
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub user_id: String,
    pub question_id: Uuid,
    pub code: String,
    pub language: Language,
    pub status: Verdict,
    pub avg_time_ms: f64,
    pub avg_memory_kb: f64,
    pub test_cases_passed: i32,
    pub total_test_cases: i32,
}

/// Outcome of one test case or of a whole submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    WrongAnswer,
    CompilationError,
    RuntimeError,
    TimeLimitExceeded,
    /// The engine could not produce a verdict (transport failure, timeout, unknown status)
    Error,
}

impl Verdict {
    /// Get verdict as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::WrongAnswer => "wrong_answer",
            Self::CompilationError => "compilation_error",
            Self::RuntimeError => "runtime_error",
            Self::TimeLimitExceeded => "time_limit_exceeded",
            Self::Error => "error",
        }
    }

    /// Parse verdict from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "accepted" => Some(Self::Accepted),
            "wrong_answer" => Some(Self::WrongAnswer),
            "compilation_error" => Some(Self::CompilationError),
            "runtime_error" => Some(Self::RuntimeError),
            "time_limit_exceeded" => Some(Self::TimeLimitExceeded),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Check if this verdict means the solution was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
