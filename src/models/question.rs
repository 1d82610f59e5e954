//! Question model

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

use crate::error::AppError;
use crate::judge::languages::Language;

/// Question difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Worked example shown with the problem statement (display only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionExample {
    pub input: String,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// One graded input/output pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
    #[serde(default)]
    pub is_hidden: bool,
}

/// A coding question owned by exactly one user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub constraints: Option<String>,
    pub examples: Vec<QuestionExample>,
    pub test_cases: Vec<TestCase>,
    pub starter_code: BTreeMap<Language, String>,
    pub hints: Vec<String>,
    pub tags: Vec<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Test cases the owner is allowed to see
    pub fn visible_test_cases(&self) -> impl Iterator<Item = &TestCase> {
        self.test_cases.iter().filter(|tc| !tc.is_hidden)
    }

    pub fn hidden_test_case_count(&self) -> usize {
        self.test_cases.iter().filter(|tc| tc.is_hidden).count()
    }
}

/// Raw `questions` row
#[derive(Debug, FromRow)]
pub struct QuestionRow {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub category: String,
    pub constraints: Option<String>,
    pub examples: Json<Vec<QuestionExample>>,
    pub test_cases: Json<Vec<TestCase>>,
    pub starter_code: Json<BTreeMap<String, String>>,
    pub hints: Vec<String>,
    pub tags: Vec<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = AppError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let difficulty = Difficulty::from_str(&row.difficulty).ok_or_else(|| {
            AppError::Database(format!(
                "question {} has unknown difficulty '{}'",
                row.id, row.difficulty
            ))
        })?;

        // Starter code for languages we no longer support is dropped
        let starter_code = row
            .starter_code
            .0
            .into_iter()
            .filter_map(|(lang, code)| match Language::resolve(&lang) {
                Ok(language) => Some((language, code)),
                Err(_) => {
                    tracing::debug!(question_id = %row.id, language = %lang, "Skipping starter code");
                    None
                }
            })
            .collect();

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            difficulty,
            category: row.category,
            constraints: row.constraints,
            examples: row.examples.0,
            test_cases: row.test_cases.0,
            starter_code,
            hints: row.hints,
            tags: row.tags,
            time_complexity: row.time_complexity,
            space_complexity: row.space_complexity,
            created_at: row.created_at,
        })
    }
}

/// Values for a question handed over by the generator
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub constraints: Option<String>,
    pub examples: Vec<QuestionExample>,
    pub test_cases: Vec<TestCase>,
    pub starter_code: BTreeMap<Language, String>,
    pub hints: Vec<String>,
    pub tags: Vec<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
}
