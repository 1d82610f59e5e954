//! Single test case execution

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::judge::{
    engine::{EngineError, EngineRequest, ExecutionEngine},
    languages::EngineLanguageId,
    verdict,
};
use crate::models::{TestCase, Verdict};

/// Outcome of running one test case
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    /// Position of the test case in the question's list
    pub index: usize,
    pub status: Verdict,
    pub passed: bool,
    pub is_hidden: bool,
    pub input: String,
    pub expected_output: String,
    pub actual_output: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub time_ms: Option<f64>,
    pub memory_kb: Option<f64>,
    /// Why the engine could not judge this case
    pub error: Option<String>,
}

impl TestResult {
    fn engine_error(index: usize, test_case: &TestCase, reason: String) -> Self {
        Self {
            index,
            status: Verdict::Error,
            passed: false,
            is_hidden: test_case.is_hidden,
            input: test_case.input.clone(),
            expected_output: test_case.expected_output.clone(),
            actual_output: None,
            stderr: None,
            compile_output: None,
            time_ms: None,
            memory_kb: None,
            error: Some(reason),
        }
    }
}

/// Runs one (code, language, test case) triple against the execution engine
#[derive(Clone)]
pub struct TestCaseRunner {
    engine: Arc<dyn ExecutionEngine>,
    timeout: Duration,
}

impl TestCaseRunner {
    pub fn new(engine: Arc<dyn ExecutionEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    /// Run a test case. Engine failures are reported in the result, never returned.
    pub async fn run(
        &self,
        source_code: &str,
        language_id: EngineLanguageId,
        index: usize,
        test_case: &TestCase,
    ) -> TestResult {
        let request = EngineRequest {
            source_code: source_code.to_string(),
            language_id,
            stdin: test_case.input.clone(),
            expected_output: test_case.expected_output.clone(),
        };

        let reply = match tokio::time::timeout(self.timeout, self.engine.submit(&request)).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                warn!(test_case = index, error = %e, "Engine call failed");
                return TestResult::engine_error(index, test_case, e.to_string());
            }
            Err(_) => {
                let e = EngineError::Timeout(self.timeout);
                warn!(test_case = index, error = %e, "Engine call timed out");
                return TestResult::engine_error(index, test_case, e.to_string());
            }
        };

        let status = verdict::classify(&reply, &test_case.expected_output);
        let error = (status == Verdict::Error).then(|| {
            reply
                .message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| {
                    format!(
                        "engine status {} ({})",
                        reply.status_id, reply.status_description
                    )
                })
        });

        TestResult {
            index,
            status,
            passed: status.is_accepted(),
            is_hidden: test_case.is_hidden,
            input: test_case.input.clone(),
            expected_output: test_case.expected_output.clone(),
            actual_output: reply.stdout,
            stderr: reply.stderr,
            compile_output: reply.compile_output,
            time_ms: reply.time_ms,
            memory_kb: reply.memory_kb,
            error,
        }
    }
}
