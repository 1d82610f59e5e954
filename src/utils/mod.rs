//! Utility functions

pub mod validation;

pub use validation::{normalize_labels, page_offset, parse_id, require_non_empty, sanitize_string, validate_source_code};
