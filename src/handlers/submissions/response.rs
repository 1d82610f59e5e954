//! Submission response DTOs

use serde::Serialize;

use crate::{
    constants::FAILED_EXAMPLES_SHOWN,
    judge::aggregator::{AggregateResult, TestResult},
    models::{Difficulty, Submission, UserProgress, Verdict},
    services::submission_service::{OutcomeWarning, SubmissionOutcome},
};

/// Result of grading one submission
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionResponse {
    /// Stored record, absent when `recorded` is false
    pub submission: Option<Submission>,
    pub recorded: bool,
    pub results: Vec<TestResultView>,
    pub summary: SubmissionSummary,
    /// A few failing visible test cases, for quick feedback
    pub failed_examples: Vec<TestResultView>,
    pub progress: Option<UserProgress>,
    pub warnings: Vec<WarningView>,
}

impl From<SubmissionOutcome> for CreateSubmissionResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        let recorded = outcome.recorded();
        let summary = SubmissionSummary::new(&outcome.aggregate, outcome.difficulty);

        let failed_examples = outcome
            .aggregate
            .results
            .iter()
            .filter(|r| !r.passed && !r.is_hidden)
            .take(FAILED_EXAMPLES_SHOWN)
            .map(TestResultView::from)
            .collect();
        let results = outcome
            .aggregate
            .results
            .iter()
            .map(TestResultView::from)
            .collect();

        Self {
            submission: outcome.submission,
            recorded,
            results,
            summary,
            failed_examples,
            progress: outcome.progress,
            warnings: outcome.warnings.iter().map(WarningView::from).collect(),
        }
    }
}

/// Totals across all test cases
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    pub total_test_cases: usize,
    pub passed_test_cases: usize,
    pub status: Verdict,
    pub all_passed: bool,
    pub avg_time_ms: f64,
    pub avg_memory_kb: f64,
    pub difficulty: Difficulty,
}

impl SubmissionSummary {
    fn new(aggregate: &AggregateResult, difficulty: Difficulty) -> Self {
        Self {
            total_test_cases: aggregate.total,
            passed_test_cases: aggregate.passed,
            status: aggregate.status,
            all_passed: aggregate.all_passed(),
            avg_time_ms: aggregate.avg_time_ms,
            avg_memory_kb: aggregate.avg_memory_kb,
            difficulty,
        }
    }
}

/// One test case outcome as shown to the submitter
///
/// Hidden cases report only their verdict and resource usage.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultView {
    pub index: usize,
    pub status: Verdict,
    pub passed: bool,
    pub is_hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_output: Option<String>,
    pub time_ms: Option<f64>,
    pub memory_kb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&TestResult> for TestResultView {
    fn from(r: &TestResult) -> Self {
        let shown = |value: &str| (!r.is_hidden).then(|| value.to_string());

        Self {
            index: r.index,
            status: r.status,
            passed: r.passed,
            is_hidden: r.is_hidden,
            input: shown(&r.input),
            expected_output: shown(&r.expected_output),
            actual_output: r.actual_output.as_deref().and_then(shown),
            stderr: r.stderr.as_deref().and_then(shown),
            compile_output: r.compile_output.clone(),
            time_ms: r.time_ms,
            memory_kb: r.memory_kb,
            error: r.error.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WarningView {
    pub code: &'static str,
    pub message: String,
}

impl From<&OutcomeWarning> for WarningView {
    fn from(w: &OutcomeWarning) -> Self {
        Self {
            code: w.code(),
            message: w.message().to_string(),
        }
    }
}

/// Submission list response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsListResponse {
    pub submissions: Vec<Submission>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// A stored submission including its source
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetailResponse {
    #[serde(flatten)]
    pub submission: Submission,
    pub code: String,
}

impl From<Submission> for SubmissionDetailResponse {
    fn from(submission: Submission) -> Self {
        Self {
            code: submission.code.clone(),
            submission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::aggregator::AggregateResult;

    fn result(index: usize, status: Verdict, is_hidden: bool) -> TestResult {
        TestResult {
            index,
            status,
            passed: status.is_accepted(),
            is_hidden,
            input: format!("in{}", index),
            expected_output: format!("out{}", index),
            actual_output: Some("wrong".to_string()),
            stderr: None,
            compile_output: None,
            time_ms: Some(4.0),
            memory_kb: Some(100.0),
            error: None,
        }
    }

    fn outcome(results: Vec<TestResult>) -> SubmissionOutcome {
        SubmissionOutcome {
            submission: None,
            aggregate: AggregateResult::from_results(results),
            difficulty: Difficulty::Medium,
            progress: None,
            warnings: vec![OutcomeWarning::NotRecorded("not saved".to_string())],
        }
    }

    #[test]
    fn test_hidden_cases_do_not_leak_data() {
        let view = TestResultView::from(&result(0, Verdict::WrongAnswer, true));

        assert!(view.input.is_none());
        assert!(view.expected_output.is_none());
        assert!(view.actual_output.is_none());
        assert_eq!(view.status, Verdict::WrongAnswer);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("input").is_none());
        assert_eq!(json["isHidden"], true);
    }

    #[test]
    fn test_failed_examples_are_visible_and_capped() {
        let mut results = vec![result(0, Verdict::WrongAnswer, true)];
        results.extend((1..6).map(|i| result(i, Verdict::WrongAnswer, false)));
        results.push(result(6, Verdict::Accepted, false));

        let response = CreateSubmissionResponse::from(outcome(results));

        assert_eq!(response.results.len(), 7);
        assert_eq!(response.failed_examples.len(), FAILED_EXAMPLES_SHOWN);
        assert!(response.failed_examples.iter().all(|r| !r.is_hidden && !r.passed));
        assert_eq!(response.failed_examples[0].index, 1);
        assert!(!response.recorded);
        assert_eq!(response.warnings[0].code, "submission_not_recorded");
        assert_eq!(response.summary.passed_test_cases, 1);
        assert_eq!(response.summary.total_test_cases, 7);
        assert!(!response.summary.all_passed);
    }
}
