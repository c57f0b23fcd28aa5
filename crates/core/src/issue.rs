//! Issue field value sets, defaults, and server-side validators.
//!
//! The client sanitizes and validates input before submission, but these
//! validators are the authority on what the backend accepts.

use crate::error::CoreError;
use crate::forms::{self, FieldContext};

// ---------------------------------------------------------------------------
// Value sets and defaults
// ---------------------------------------------------------------------------

pub const SEVERITY_LOW: &str = "Low";
pub const SEVERITY_MEDIUM: &str = "Medium";
pub const SEVERITY_HIGH: &str = "High";

/// All valid severities.
pub const VALID_SEVERITIES: &[&str] = &[SEVERITY_LOW, SEVERITY_MEDIUM, SEVERITY_HIGH];

pub const PRIORITY_LOW: &str = "Low";
pub const PRIORITY_NORMAL: &str = "Normal";
pub const PRIORITY_HIGH: &str = "High";

/// All valid priorities.
pub const VALID_PRIORITIES: &[&str] = &[PRIORITY_LOW, PRIORITY_NORMAL, PRIORITY_HIGH];

pub const STATUS_OPEN: &str = "Open";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_TESTING: &str = "Testing";
pub const STATUS_RESOLVED: &str = "Resolved";
pub const STATUS_CLOSED: &str = "Closed";

/// All valid statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_OPEN,
    STATUS_IN_PROGRESS,
    STATUS_TESTING,
    STATUS_RESOLVED,
    STATUS_CLOSED,
];

/// Default severity for a new issue.
pub const DEFAULT_SEVERITY: &str = SEVERITY_MEDIUM;
/// Default priority for a new issue.
pub const DEFAULT_PRIORITY: &str = PRIORITY_NORMAL;
/// Default status for a new issue.
pub const DEFAULT_STATUS: &str = STATUS_OPEN;

/// Title length bounds (characters, counted after sanitization).
pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;

/// Description length bounds (characters, counted after sanitization).
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Validate an issue title against the form rules.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    run_field_rules("title", title)
}

/// Validate an issue description against the form rules.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    run_field_rules("description", description)
}

/// Validate that a severity is one of the known values.
pub fn validate_severity(severity: &str) -> Result<(), CoreError> {
    run_field_rules("severity", severity)
}

/// Validate that a priority is one of the known values.
pub fn validate_priority(priority: &str) -> Result<(), CoreError> {
    run_field_rules("priority", priority)
}

/// Validate that a status is one of the known values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    run_field_rules("status", status)
}

/// Run the shared form rules for one field, lifting the message into
/// [`CoreError::Validation`].
fn run_field_rules(field: &str, value: &str) -> Result<(), CoreError> {
    match forms::validate_field(field, value, &FieldContext::default()) {
        None => Ok(()),
        Some(msg) => Err(CoreError::Validation(msg.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
