//! Repository for the `issues` table.

use sqlx::PgPool;
use tracker_core::issue::{DEFAULT_PRIORITY, DEFAULT_SEVERITY, DEFAULT_STATUS};
use tracker_core::types::DbId;

use crate::models::issue::{CreateIssue, Issue, UpdateIssue};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, description, severity, priority, status, created_at, updated_at";

/// Provides CRUD operations for issues.
pub struct IssueRepo;

impl IssueRepo {
    /// Insert a new issue, returning the created row.
    ///
    /// Omitted enum fields take their documented defaults.
    pub async fn create(pool: &PgPool, input: &CreateIssue) -> Result<Issue, sqlx::Error> {
        let query = format!(
            "INSERT INTO issues (title, description, severity, priority, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Issue>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.severity.as_deref().unwrap_or(DEFAULT_SEVERITY))
            .bind(input.priority.as_deref().unwrap_or(DEFAULT_PRIORITY))
            .bind(input.status.as_deref().unwrap_or(DEFAULT_STATUS))
            .fetch_one(pool)
            .await
    }

    /// Find an issue by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Issue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM issues WHERE id = $1");
        sqlx::query_as::<_, Issue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all issues, newest first.
    ///
    /// Unpaginated: the collection is filtered in memory by the caller.
    pub async fn list(pool: &PgPool) -> Result<Vec<Issue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM issues ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Issue>(&query).fetch_all(pool).await
    }

    /// Replace the mutable fields of an issue.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIssue,
    ) -> Result<Option<Issue>, sqlx::Error> {
        let query = format!(
            "UPDATE issues SET
                title = $2,
                description = $3,
                severity = $4,
                priority = $5,
                status = $6,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Issue>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.severity)
            .bind(&input.priority)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete an issue. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM issues WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
