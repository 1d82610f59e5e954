//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod progress;
pub mod question;
pub mod submission;

pub use progress::*;
pub use question::*;
pub use submission::*;
