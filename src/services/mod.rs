//! Business logic services

pub mod progress_service;
pub mod question_service;
pub mod submission_service;

pub use progress_service::{ProgressService, ProgressUpdater};
pub use question_service::QuestionService;
pub use submission_service::SubmissionService;
