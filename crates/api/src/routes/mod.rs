pub mod auth;
pub mod health;
pub mod issues;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register          register (public)
/// /auth/login             login (public)
/// /auth/google            Google OAuth passthrough (public)
/// /auth/profile           get, update, delete (requires auth)
///
/// /issues                 list (public), create (requires auth)
/// /issues/{id}            get (public), update, delete (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/issues", issues::router())
}
