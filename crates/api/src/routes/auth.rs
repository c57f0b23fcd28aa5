//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register  -> register
/// POST /login     -> login
/// POST /google    -> google_sign_in
/// GET  /profile   -> get_profile (requires auth)
/// PUT  /profile   -> update_profile (requires auth)
/// DELETE /profile -> delete_profile (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/google", post(auth::google_sign_in))
        .route(
            "/profile",
            get(auth::get_profile)
                .put(auth::update_profile)
                .delete(auth::delete_profile),
        )
}
