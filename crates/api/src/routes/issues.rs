//! Route definitions for the `/issues` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::issues;
use crate::state::AppState;

/// Routes mounted at `/issues`.
///
/// ```text
/// POST   /       -> create_issue (requires auth)
/// GET    /       -> list_issues
/// GET    /{id}   -> get_issue
/// PUT    /{id}   -> update_issue (requires auth)
/// DELETE /{id}   -> delete_issue (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(issues::list_issues).post(issues::create_issue),
        )
        .route(
            "/{id}",
            get(issues::get_issue)
                .put(issues::update_issue)
                .delete(issues::delete_issue),
        )
}
