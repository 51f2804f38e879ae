//! Task Validation Module
//!
//! Checks candidate task fields and reports every violated rule together.

use crate::error::{Result, TaskError};
use crate::models::TaskStatus;

// == Rule Messages ==
pub const TITLE_RULE: &str = "Title is required and must be a non-empty string";
pub const DESCRIPTION_RULE: &str = "Description is required and must be a string";
pub const STATUS_RULE: &str = "Status must be one of: todo, in progress, done";

// == Task Draft ==
/// Validated, trimmed task fields ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

// == Validate ==
/// Validates candidate task fields.
///
/// Title and description must be present and non-empty after trimming;
/// status must be present and one of the known values. All violations are
/// collected into a single `TaskError::Validation`.
pub fn validate(
    title: Option<&str>,
    description: Option<&str>,
    status: Option<&str>,
) -> Result<TaskDraft> {
    let mut errors = Vec::new();

    let title = title.map(str::trim).filter(|t| !t.is_empty());
    if title.is_none() {
        errors.push(TITLE_RULE.to_string());
    }

    let description = description.map(str::trim).filter(|d| !d.is_empty());
    if description.is_none() {
        errors.push(DESCRIPTION_RULE.to_string());
    }

    let status = status.and_then(|s| s.parse::<TaskStatus>().ok());
    if status.is_none() {
        errors.push(STATUS_RULE.to_string());
    }

    match (title, description, status) {
        (Some(title), Some(description), Some(status)) => Ok(TaskDraft {
            title: title.to_string(),
            description: description.to_string(),
            status,
        }),
        _ => Err(TaskError::Validation(errors)),
    }
}
