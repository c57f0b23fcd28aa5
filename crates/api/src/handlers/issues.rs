//! Handlers for the `/issues` resource.
//!
//! Reads are public; mutations require authentication. Any authenticated
//! user may mutate any issue -- there is no role or ownership model.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracker_core::error::CoreError;
use tracker_core::filter::IssueFilter;
use tracker_core::forms::{self, CharClass};
use tracker_core::issue;
use tracker_core::types::DbId;
use tracker_db::models::issue::{CreateIssue, Issue, UpdateIssue};
use tracker_db::repositories::IssueRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /issues
// ---------------------------------------------------------------------------

/// Create a new issue from sanitized, validated input.
pub async fn create_issue(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateIssue>,
) -> AppResult<(StatusCode, Json<Issue>)> {
    let input = sanitize_create(input);

    issue::validate_title(&input.title)?;
    issue::validate_description(input.description.as_deref().unwrap_or(""))?;
    if let Some(ref severity) = input.severity {
        issue::validate_severity(severity)?;
    }
    if let Some(ref priority) = input.priority {
        issue::validate_priority(priority)?;
    }
    if let Some(ref status) = input.status {
        issue::validate_status(status)?;
    }

    let created = IssueRepo::create(&state.pool, &input).await?;

    tracing::info!(issue_id = created.id, user_id = auth.user_id, "Issue created");

    Ok((StatusCode::CREATED, Json(created)))
}

// ---------------------------------------------------------------------------
// GET /issues
// ---------------------------------------------------------------------------

/// List issues, newest first.
///
/// The optional `text` / `status` / `priority` / `severity` query parameters
/// run the collection through the filter engine; absent parameters default
/// to the unconstrained filter, so a bare `GET /issues` returns everything.
pub async fn list_issues(
    State(state): State<AppState>,
    Query(filter): Query<IssueFilter>,
) -> AppResult<Json<Vec<Issue>>> {
    let issues = IssueRepo::list(&state.pool).await?;
    Ok(Json(filter.apply(issues)))
}

// ---------------------------------------------------------------------------
// GET /issues/{id}
// ---------------------------------------------------------------------------

/// Get a single issue by ID.
pub async fn get_issue(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Issue>> {
    let issue = IssueRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Issue", id }))?;
    Ok(Json(issue))
}

// ---------------------------------------------------------------------------
// PUT /issues/{id}
// ---------------------------------------------------------------------------

/// Full replace of an issue's mutable fields.
pub async fn update_issue(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIssue>,
) -> AppResult<Json<Issue>> {
    let input = sanitize_update(input);

    issue::validate_title(&input.title)?;
    issue::validate_description(input.description.as_deref().unwrap_or(""))?;
    issue::validate_severity(&input.severity)?;
    issue::validate_priority(&input.priority)?;
    issue::validate_status(&input.status)?;

    let updated = IssueRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Issue", id }))?;

    tracing::info!(issue_id = id, user_id = auth.user_id, "Issue updated");

    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// DELETE /issues/{id}
// ---------------------------------------------------------------------------

/// Delete an issue by ID.
pub async fn delete_issue(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = IssueRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Issue", id }));
    }

    tracing::info!(issue_id = id, user_id = auth.user_id, "Issue deleted");

    Ok(Json(MessageResponse {
        message: "Issue deleted",
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Apply the entry-time character filters before validation, mirroring the
/// client. Stored titles and descriptions never contain characters outside
/// their allowed sets.
fn sanitize_create(input: CreateIssue) -> CreateIssue {
    CreateIssue {
        title: forms::sanitize(CharClass::Title, &input.title),
        description: input
            .description
            .map(|d| forms::sanitize(CharClass::Description, &d)),
        ..input
    }
}

fn sanitize_update(input: UpdateIssue) -> UpdateIssue {
    UpdateIssue {
        title: forms::sanitize(CharClass::Title, &input.title),
        description: input
            .description
            .map(|d| forms::sanitize(CharClass::Description, &d)),
        ..input
    }
}
