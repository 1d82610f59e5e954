//! Question request DTOs

use std::collections::BTreeMap;

use serde::Deserialize;
use validator::Validate;

use crate::constants::{
    MAX_QUESTION_DESCRIPTION_LENGTH, MAX_QUESTION_TITLE_LENGTH, MAX_TEST_CASES_PER_QUESTION,
};
use crate::models::{QuestionExample, TestCase};

/// Question handed over by the generator
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImportQuestionRequest {
    #[validate(length(min = 1, max = MAX_QUESTION_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(min = 1, max = MAX_QUESTION_DESCRIPTION_LENGTH))]
    pub description: String,

    /// easy, medium or hard
    pub difficulty: String,

    #[validate(length(min = 1, max = 64))]
    pub category: String,

    pub constraints: Option<String>,

    #[serde(default)]
    pub examples: Vec<QuestionExample>,

    /// Graded cases; hidden ones are never shown back
    #[validate(length(min = 1, max = MAX_TEST_CASES_PER_QUESTION))]
    pub test_cases: Vec<TestCase>,

    /// Language id to starter code
    #[serde(default)]
    pub starter_code: BTreeMap<String, String>,

    #[serde(default)]
    pub hints: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
}

/// List questions query parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuestionsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub difficulty: Option<String>,
}
