//! Multi-test-case evaluation and result aggregation

use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::judge::{languages::Language, runner::TestCaseRunner, verdict};
use crate::models::{TestCase, Verdict};

pub use crate::judge::runner::TestResult;

/// A non-empty list of test cases
#[derive(Debug, Clone, PartialEq)]
pub struct TestSuite(Vec<TestCase>);

impl TestSuite {
    /// `None` when there is nothing to grade against
    pub fn new(test_cases: Vec<TestCase>) -> Option<Self> {
        if test_cases.is_empty() {
            None
        } else {
            Some(Self(test_cases))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.0.iter()
    }
}

/// Combined outcome of all test cases of one submission
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    /// `results[i]` belongs to test case `i`
    pub results: Vec<TestResult>,
    pub status: Verdict,
    pub passed: usize,
    pub total: usize,
    pub avg_time_ms: f64,
    pub avg_memory_kb: f64,
}

impl AggregateResult {
    pub fn from_results(results: Vec<TestResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let verdicts: Vec<Verdict> = results.iter().map(|r| r.status).collect();

        // Cases without timing data count as zero
        let mean = |values: f64| if total == 0 { 0.0 } else { values / total as f64 };
        let avg_time_ms = mean(results.iter().map(|r| r.time_ms.unwrap_or(0.0)).sum());
        let avg_memory_kb = mean(results.iter().map(|r| r.memory_kb.unwrap_or(0.0)).sum());

        Self {
            status: verdict::overall_verdict(&verdicts),
            results,
            passed,
            total,
            avg_time_ms,
            avg_memory_kb,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }

    /// True when the engine failed on every case, i.e. nothing was judged
    pub fn engine_failed_everywhere(&self) -> bool {
        self.total > 0 && self.results.iter().all(|r| r.status == Verdict::Error)
    }
}

/// Runs a submission against a whole test suite
#[derive(Clone)]
pub struct Aggregator {
    runner: TestCaseRunner,
    max_concurrency: usize,
}

impl Aggregator {
    pub fn new(runner: TestCaseRunner, max_concurrency: usize) -> Self {
        Self {
            runner,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Evaluate source code against every test case
    ///
    /// Engine calls run up to `max_concurrency` at a time; results are
    /// returned in test-case order regardless of completion order.
    pub async fn evaluate(
        &self,
        source_code: &str,
        language: Language,
        suite: &TestSuite,
    ) -> AggregateResult {
        let language_id = language.engine_id();

        // Futures are built up front so the stream owns them outright
        let runs: Vec<_> = suite
            .iter()
            .enumerate()
            .map(|(index, test_case)| self.runner.run(source_code, language_id, index, test_case))
            .collect();

        let results: Vec<TestResult> = stream::iter(runs)
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let aggregate = AggregateResult::from_results(results);
        debug!(
            language = %language,
            status = %aggregate.status,
            passed = aggregate.passed,
            total = aggregate.total,
            "Evaluation finished"
        );
        aggregate
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::test_utils::{test_case, ScriptedEngine};

    fn aggregator(engine: ScriptedEngine, concurrency: usize) -> Aggregator {
        let runner = TestCaseRunner::new(Arc::new(engine), Duration::from_secs(2));
        Aggregator::new(runner, concurrency)
    }

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn test_evaluation_future_can_be_spawned() {
        let agg = aggregator(ScriptedEngine::echo(), 2);
        let suite = TestSuite::new(vec![test_case("1", "1")]).unwrap();
        let evaluation = agg.evaluate("cat", Language::Python, &suite);
        assert_send(&evaluation);
    }

    #[tokio::test]
    async fn test_evaluation_runs_on_spawned_task() {
        let agg = aggregator(ScriptedEngine::echo(), 2);
        let suite = TestSuite::new(vec![test_case("1", "1"), test_case("2", "2")]).unwrap();

        let result = tokio::spawn(async move { agg.evaluate("cat", Language::Rust, &suite).await })
            .await
            .unwrap();

        assert!(result.all_passed());
    }

    #[test]
    fn test_empty_suite_is_unrepresentable() {
        assert!(TestSuite::new(vec![]).is_none());
        assert_eq!(TestSuite::new(vec![test_case("1", "1")]).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_results_keep_test_case_order_under_concurrency() {
        // Earlier cases answer later, so completion order is reversed
        let engine = ScriptedEngine::echo().with_delay_by_input(|input| {
            let n: u64 = input.trim().parse().unwrap_or(0);
            Duration::from_millis(80 - n * 10)
        });
        let suite = TestSuite::new((0..6).map(|i| test_case(&i.to_string(), &i.to_string())).collect())
            .unwrap();

        let result = aggregator(engine, 6).evaluate("cat", Language::Python, &suite).await;

        assert_eq!(result.total, 6);
        for (i, r) in result.results.iter().enumerate() {
            assert_eq!(r.index, i);
            assert_eq!(r.input, i.to_string());
        }
        assert_eq!(result.status, Verdict::Accepted);
        assert!(result.all_passed());
    }

    #[tokio::test]
    async fn test_runtime_error_outranks_wrong_answer() {
        let engine = ScriptedEngine::echo().fail_input_with("crash", 11);
        let suite = TestSuite::new(vec![
            test_case("1", "2"), // wrong answer: echo prints 1
            test_case("crash", "ok"),
        ])
        .unwrap();

        let result = aggregator(engine, 2).evaluate("cat", Language::Cpp, &suite).await;

        assert_eq!(result.results[0].status, Verdict::WrongAnswer);
        assert_eq!(result.results[1].status, Verdict::RuntimeError);
        assert_eq!(result.status, Verdict::RuntimeError);
        assert_eq!(result.passed, 0);
        assert!(!result.all_passed());
    }

    #[tokio::test]
    async fn test_compilation_error_on_every_case() {
        let engine = ScriptedEngine::with_status(6);
        let suite = TestSuite::new(vec![test_case("1", "1"), test_case("2", "2")]).unwrap();

        let result = aggregator(engine, 1).evaluate("int main(", Language::C, &suite).await;

        assert!(result.results.iter().all(|r| r.status == Verdict::CompilationError));
        assert_eq!(result.status, Verdict::CompilationError);
    }

    #[tokio::test]
    async fn test_engine_errors_do_not_abort_siblings() {
        let engine = ScriptedEngine::echo().unreachable_for("down");
        let suite = TestSuite::new(vec![
            test_case("a", "a"),
            test_case("down", "down"),
            test_case("c", "c"),
        ])
        .unwrap();

        let result = aggregator(engine, 1).evaluate("cat", Language::Go, &suite).await;

        assert_eq!(result.results.len(), 3);
        assert!(result.results[0].passed);
        assert_eq!(result.results[1].status, Verdict::Error);
        assert!(result.results[2].passed);
        assert_eq!(result.passed, 2);
        assert_eq!(result.status, Verdict::WrongAnswer);
        assert!(!result.engine_failed_everywhere());
    }

    #[test]
    fn test_means_count_missing_timing_as_zero() {
        let ok = TestResult {
            index: 0,
            status: Verdict::Accepted,
            passed: true,
            is_hidden: false,
            input: String::new(),
            expected_output: String::new(),
            actual_output: None,
            stderr: None,
            compile_output: None,
            time_ms: Some(30.0),
            memory_kb: Some(1000.0),
            error: None,
        };
        let mut errored = ok.clone();
        errored.index = 1;
        errored.status = Verdict::Error;
        errored.passed = false;
        errored.time_ms = None;
        errored.memory_kb = None;

        let result = AggregateResult::from_results(vec![ok, errored]);

        assert_eq!(result.avg_time_ms, 15.0);
        assert_eq!(result.avg_memory_kb, 500.0);
        assert_eq!(result.passed, 1);
        assert_eq!(result.status, Verdict::WrongAnswer);
    }
}
