//! Handlers for the `/auth` resource (register, login, Google sign-in,
//! profile management).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracker_core::error::CoreError;
use tracker_core::forms::{self, CharClass, FieldContext, USERNAME_MIN_CHARS};
use uuid::Uuid;
use tracker_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use tracker_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/google`.
///
/// The client has already completed the Google OAuth flow; this is a
/// passthrough carrying the verified profile.
#[derive(Debug, Deserialize)]
pub struct GoogleSignInRequest {
    pub google_id: String,
    pub email: String,
    /// Display name suggested by Google; sanitized before use.
    #[serde(default)]
    pub username: String,
}

/// Request body for `PUT /auth/profile`. All fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful authentication response returned by register, login, and
/// Google sign-in.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create a local account. Applies the registration rule set (username
/// charset, email shape, password complexity); the password is stored only
/// as an Argon2id hash. Duplicate usernames surface as 409.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let ctx = FieldContext {
        registration: true,
        password: None,
    };
    check_field("username", &input.username, &ctx)?;
    check_field("email", &input.email, &ctx)?;
    check_field("password", &input.password, &ctx)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash: Some(password_hash),
            google_id: None,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    let response = auth_response(&state, user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
///
/// Authenticate with username + password. Returns a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    // Google-provisioned accounts have no local password.
    let hash = user.password_hash.clone().ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(auth_response(&state, user)?))
}

/// POST /api/auth/google
///
/// Google OAuth passthrough. Matches an account by Google id, then by email
/// (linking the id), and otherwise provisions a password-less account.
pub async fn google_sign_in(
    State(state): State<AppState>,
    Json(input): Json<GoogleSignInRequest>,
) -> AppResult<Json<AuthResponse>> {
    if input.google_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Google account id is required".into(),
        )));
    }
    check_field("email", &input.email, &FieldContext::default())?;

    if let Some(user) = UserRepo::find_by_google_id(&state.pool, &input.google_id).await? {
        return Ok(Json(auth_response(&state, user)?));
    }

    if let Some(existing) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        let linked = UserRepo::link_google_id(&state.pool, existing.id, &input.google_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
        tracing::info!(user_id = linked.id, "Linked Google id to existing account");
        return Ok(Json(auth_response(&state, linked)?));
    }

    let username = provisioned_username(&input.username, &input.email);

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            email: input.email,
            password_hash: None,
            google_id: Some(input.google_id),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Provisioned account from Google sign-in");

    Ok(Json(auth_response(&state, user)?))
}

/// GET /api/auth/profile
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = current_user(&state, &auth).await?;
    Ok(Json(user.into()))
}

/// PUT /api/auth/profile
///
/// Partial update of username, email, and password. Google accounts manage
/// their profile through Google and are rejected here.
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = current_user(&state, &auth).await?;

    if user.is_google_account() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Profile editing is not available for Google accounts. \
             Please manage your profile through your Google account settings."
                .into(),
        )));
    }

    let ctx = FieldContext {
        registration: true,
        password: None,
    };
    if let Some(ref username) = input.username {
        check_field("username", username, &ctx)?;
    }
    if let Some(ref email) = input.email {
        check_field("email", email, &ctx)?;
    }
    if let Some(ref password) = input.password {
        check_field("password", password, &ctx)?;
    }

    let password_hash = input
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::update(
        &state.pool,
        user.id,
        &UpdateUser {
            username: input.username,
            email: input.email,
            password_hash,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "User",
        id: user.id,
    }))?;

    tracing::info!(user_id = user.id, "Profile updated");

    Ok(Json(updated.into()))
}

/// DELETE /api/auth/profile
///
/// Hard-delete the authenticated account. There is no soft-delete.
pub async fn delete_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = UserRepo::delete(&state.pool, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }));
    }

    tracing::info!(user_id = auth.user_id, "Account deleted");

    Ok(Json(MessageResponse {
        message: "Account deleted",
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run the shared form rules for one field, mapping a failure to 400.
fn check_field(field: &str, value: &str, ctx: &FieldContext) -> Result<(), AppError> {
    match forms::validate_field(field, value, ctx) {
        None => Ok(()),
        Some(msg) => Err(AppError::Core(CoreError::Validation(msg.to_string()))),
    }
}

/// Uniform 401 for unknown users and wrong passwords alike.
fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// Load the authenticated user's row, treating a deleted account as 401.
async fn current_user(state: &AppState, auth: &AuthUser) -> Result<User, AppError> {
    UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))
}

/// Username for a Google-provisioned account.
///
/// The display name and email local part are not user-typed against our
/// rules, so each candidate is sanitized to the username charset and must
/// still clear the minimum length; when neither does (a fully non-ASCII
/// name, say), a random placeholder keeps the username invariants intact.
fn provisioned_username(display_name: &str, email: &str) -> String {
    let candidate = forms::sanitize(CharClass::Username, display_name);
    if candidate.chars().count() >= USERNAME_MIN_CHARS {
        return candidate;
    }

    let local = email.split('@').next().unwrap_or_default();
    let candidate = forms::sanitize(CharClass::Username, local);
    if candidate.chars().count() >= USERNAME_MIN_CHARS {
        return candidate;
    }

    format!("user_{}", Uuid::new_v4().simple())
}

/// Generate a token and build the response body.
fn auth_response(state: &AppState, user: User) -> Result<AuthResponse, AppError> {
    let token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        token,
        expires_in,
        user: user.into(),
    })
}
