//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Maximum accepted request body in bytes (2 MB)
pub const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// EXECUTION ENGINE DEFAULTS
// =============================================================================

/// Default Judge0 endpoint
pub const DEFAULT_ENGINE_URL: &str = "https://judge0-ce.p.rapidapi.com";

/// Outer timeout for a single test case round trip, in seconds
pub const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 20;

/// Maximum engine calls in flight for one submission
pub const DEFAULT_ENGINE_MAX_CONCURRENCY: usize = 4;

/// Upper bound accepted for `ENGINE_MAX_CONCURRENCY`
pub const MAX_ENGINE_CONCURRENCY: usize = 32;

/// Judge0 status ids
pub mod engine_status {
    pub const IN_QUEUE: u32 = 1;
    pub const PROCESSING: u32 = 2;
    pub const ACCEPTED: u32 = 3;
    pub const WRONG_ANSWER: u32 = 4;
    pub const TIME_LIMIT_EXCEEDED: u32 = 5;
    pub const COMPILATION_ERROR: u32 = 6;
    /// SIGSEGV, SIGXFSZ, SIGFPE, SIGABRT, NZEC and "other" runtime errors
    pub const RUNTIME_ERROR_FIRST: u32 = 7;
    pub const RUNTIME_ERROR_LAST: u32 = 12;
    pub const INTERNAL_ERROR: u32 = 13;
    pub const EXEC_FORMAT_ERROR: u32 = 14;
}

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers accepted from clients
pub mod languages {
    pub const JAVASCRIPT: &str = "javascript";
    pub const TYPESCRIPT: &str = "typescript";
    pub const PYTHON: &str = "python";
    pub const JAVA: &str = "java";
    pub const CPP: &str = "cpp";
    pub const C: &str = "c";
    pub const GO: &str = "go";
    pub const RUST: &str = "rust";

    /// All supported language identifiers
    pub const ALL: &[&str] = &[JAVASCRIPT, TYPESCRIPT, PYTHON, JAVA, CPP, C, GO, RUST];
}

/// Judge0 CE language ids
pub mod engine_languages {
    pub const JAVASCRIPT: u32 = 63;
    pub const TYPESCRIPT: u32 = 74;
    pub const PYTHON: u32 = 71;
    pub const JAVA: u32 = 62;
    pub const CPP: u32 = 54;
    pub const C: u32 = 50;
    pub const GO: u32 = 60;
    pub const RUST: u32 = 73;
}

// =============================================================================
// PROGRESS
// =============================================================================

/// Solved-count thresholds for skill tiers (exclusive upper bounds)
pub mod skill_thresholds {
    pub const BEGINNER_BELOW: i32 = 10;
    pub const INTERMEDIATE_BELOW: i32 = 50;
    pub const ADVANCED_BELOW: i32 = 100;
}

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Submissions a single user may make per window
pub const DEFAULT_SUBMISSION_RATE_LIMIT: i64 = 10;

/// Submission rate limit window in seconds
pub const DEFAULT_SUBMISSION_RATE_WINDOW_SECS: i64 = 60;

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;

/// Highest page number accepted from clients
pub const MAX_PAGE_NUMBER: u32 = 100_000;

// =============================================================================
// VALIDATION & REPORTING
// =============================================================================

/// Maximum source code size in bytes (64 KB, Judge0's default limit)
pub const MAX_SOURCE_CODE_SIZE: usize = 64 * 1024;

/// Maximum question title length
pub const MAX_QUESTION_TITLE_LENGTH: u64 = 256;

/// Number of failing visible test cases echoed back to the caller
pub const FAILED_EXAMPLES_SHOWN: usize = 3;

/// Maximum question description length
pub const MAX_QUESTION_DESCRIPTION_LENGTH: u64 = 20_000;

/// Maximum number of test cases a question may carry
pub const MAX_TEST_CASES_PER_QUESTION: u64 = 200;
