//! CodeQuest Judge - grading service for personalised coding questions
//!
//! Users submit code for questions generated for them; every test case is
//! run on a Judge0 execution engine, the attempt is recorded and, once all
//! cases pass, the user's progress and skill level advance.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic, including the submission orchestrator
//! - **Judge**: Test case execution and verdict aggregation
//! - **Repositories**: Database access
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod judge;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
