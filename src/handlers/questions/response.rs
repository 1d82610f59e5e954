//! Question response DTOs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::judge::languages::Language;
use crate::models::{Difficulty, Question, QuestionExample, TestCase};

/// Question as shown to its owner
///
/// Only visible test cases are included; hidden ones are counted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub constraints: Option<String>,
    pub examples: Vec<QuestionExample>,
    pub test_cases: Vec<TestCase>,
    pub hidden_test_cases: usize,
    pub starter_code: BTreeMap<Language, String>,
    pub hints: Vec<String>,
    pub tags: Vec<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        let hidden_test_cases = q.hidden_test_case_count();
        let test_cases = q.visible_test_cases().cloned().collect();

        Self {
            id: q.id,
            title: q.title,
            description: q.description,
            difficulty: q.difficulty,
            category: q.category,
            constraints: q.constraints,
            examples: q.examples,
            test_cases,
            hidden_test_cases,
            starter_code: q.starter_code,
            hints: q.hints,
            tags: q.tags,
            time_complexity: q.time_complexity,
            space_complexity: q.space_complexity,
            created_at: q.created_at,
        }
    }
}

/// Question summary for list views
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    pub id: Uuid,
    pub title: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Question> for QuestionSummary {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            title: q.title,
            difficulty: q.difficulty,
            category: q.category,
            tags: q.tags,
            created_at: q.created_at,
        }
    }
}

/// Question list response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsListResponse {
    pub questions: Vec<QuestionSummary>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}
