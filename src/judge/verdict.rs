//! Verdict determination rules

use crate::constants::engine_status;
use crate::judge::engine::EngineReply;
use crate::models::Verdict;

/// Exact comparison after trimming surrounding whitespace on both sides
pub fn outputs_match(actual: &str, expected: &str) -> bool {
    actual.trim() == expected.trim()
}

/// Classify one engine reply against the expected output
///
/// Runs that finished (Judge0 "Accepted" or "Wrong Answer") are re-judged
/// locally by comparing stdout, so the engine's own comparison never decides
/// pass/fail.
pub fn classify(reply: &EngineReply, expected_output: &str) -> Verdict {
    match reply.status_id {
        engine_status::ACCEPTED | engine_status::WRONG_ANSWER => {
            let stdout = reply.stdout.as_deref().unwrap_or("");
            if outputs_match(stdout, expected_output) {
                Verdict::Accepted
            } else {
                Verdict::WrongAnswer
            }
        }
        engine_status::TIME_LIMIT_EXCEEDED => Verdict::TimeLimitExceeded,
        engine_status::COMPILATION_ERROR => Verdict::CompilationError,
        engine_status::RUNTIME_ERROR_FIRST..=engine_status::RUNTIME_ERROR_LAST => {
            Verdict::RuntimeError
        }
        // Queued/processing should not come back from a waiting call; treat
        // them like internal and unknown statuses.
        _ => Verdict::Error,
    }
}

/// Overall verdict for a submission, most actionable failure first
///
/// An empty slice yields [`Verdict::Error`]: nothing was judged, so nothing
/// can be accepted.
pub fn overall_verdict(verdicts: &[Verdict]) -> Verdict {
    if verdicts.is_empty() {
        return Verdict::Error;
    }
    if verdicts.iter().all(Verdict::is_accepted) {
        return Verdict::Accepted;
    }

    let any = |wanted: Verdict| verdicts.iter().any(|v| *v == wanted);

    if any(Verdict::RuntimeError) {
        Verdict::RuntimeError
    } else if any(Verdict::TimeLimitExceeded) {
        Verdict::TimeLimitExceeded
    } else if any(Verdict::CompilationError) {
        Verdict::CompilationError
    } else {
        Verdict::WrongAnswer
    }
}
