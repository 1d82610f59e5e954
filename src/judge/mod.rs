//! Grading core
//!
//! - [`languages`]: client language names to engine ids
//! - [`engine`]: the execution engine seam and its Judge0 client
//! - [`runner`]: one test case against the engine
//! - [`aggregator`]: a whole suite, with bounded concurrency
//! - [`verdict`]: per-case and overall verdict rules

pub mod aggregator;
pub mod engine;
pub mod languages;
pub mod runner;
pub mod verdict;

pub use aggregator::{AggregateResult, Aggregator, TestSuite};
pub use engine::{EngineError, ExecutionEngine, Judge0Client};
pub use languages::Language;
pub use runner::{TestCaseRunner, TestResult};
