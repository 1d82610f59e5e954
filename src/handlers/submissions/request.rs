//! Submission request DTOs

use serde::Deserialize;
use uuid::Uuid;

/// Submit code for grading
///
/// Fields are checked by the submission service so that every missing field
/// is reported by name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    #[serde(default)]
    pub question_id: String,

    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub language: String,
}

/// List submissions query parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubmissionsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub question_id: Option<Uuid>,
    pub status: Option<String>,
}
