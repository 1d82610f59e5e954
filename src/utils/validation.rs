//! Input validation utilities

use uuid::Uuid;

use crate::constants::MAX_SOURCE_CODE_SIZE;

/// Require a field to contain something other than whitespace
pub fn require_non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", field))
    } else {
        Ok(())
    }
}

/// Parse an identifier supplied by a client
pub fn parse_id(field: &str, value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("{} is not a valid id", field))
}

/// Validate source code size
pub fn validate_source_code(code: &str) -> Result<(), &'static str> {
    if code.trim().is_empty() {
        return Err("Source code cannot be empty");
    }
    if code.len() > MAX_SOURCE_CODE_SIZE {
        return Err("Source code exceeds maximum size of 64KB");
    }
    Ok(())
}

/// Row offset of a 1-based page, in `i64` so no client value can overflow it
pub fn page_offset(page: u32, per_page: u32) -> i64 {
    (i64::from(page.max(1)) - 1) * i64::from(per_page)
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalise free-form labels (tags, categories) and drop empties and duplicates
pub fn normalize_labels(labels: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let label = sanitize_string(label).to_lowercase();
        if !label.is_empty() && !out.contains(&label) {
            out.push(label);
        }
    }
    out
}
