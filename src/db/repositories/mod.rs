//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod progress_repo;
pub mod question_repo;
pub mod submission_repo;

pub use progress_repo::ProgressRepository;
pub use question_repo::QuestionRepository;
pub use submission_repo::SubmissionRepository;
