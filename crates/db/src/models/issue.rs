//! Issue entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::filter::Filterable;
use tracker_core::types::{DbId, Timestamp};

/// A row from the `issues` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Issue {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub severity: String,
    pub priority: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Filterable for Issue {
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn status(&self) -> &str {
        &self.status
    }
    fn priority(&self) -> &str {
        &self.priority
    }
    fn severity(&self) -> &str {
        &self.severity
    }
}

/// DTO for creating a new issue. Missing enum fields fall back to the
/// column defaults.
#[derive(Debug, Deserialize)]
pub struct CreateIssue {
    pub title: String,
    pub description: Option<String>,
    pub severity: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

/// DTO for updating an issue: a full replace of the mutable fields.
#[derive(Debug, Deserialize)]
pub struct UpdateIssue {
    pub title: String,
    pub description: Option<String>,
    pub severity: String,
    pub priority: String,
    pub status: String,
}
