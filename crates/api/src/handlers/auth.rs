//! Handlers for authentication (login, token verification, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use timeclock_core::error::CoreError;
use timeclock_core::types::DbId;
use timeclock_db::models::session::CreateSession;
use timeclock_db::models::user::{User, UserResponse};
use timeclock_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_token, validate_token};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/login`.
///
/// Fields are optional so a missing field maps to the documented 400
/// instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /api/verify-token`.
#[derive(Debug, Deserialize)]
pub struct VerifyTokenRequest {
    pub token: Option<String>,
}

/// Request body for `POST /api/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
///
/// `token`/`refreshToken` are the wire names the dashboard clients consume.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    pub user: UserResponse,
}

/// Decoded identity returned by `POST /api/verify-token`.
#[derive(Debug, Serialize)]
pub struct TokenUser {
    pub id: DbId,
    pub email: String,
    pub role: String,
}

/// Response body for `POST /api/verify-token`.
#[derive(Debug, Serialize)]
pub struct VerifyTokenResponse {
    pub user: TokenUser,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Authenticate with email + password. Returns an access token, a refresh
/// token (persisted as a session), and the user's public info.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (Some(email), Some(password)) = (input.email, input.password) else {
        return Err(AppError::Core(CoreError::Validation(
            "Email and password are required.".into(),
        )));
    };

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated.".into(),
        )));
    }

    let password_valid = verify_password(&password, &user)?;
    if !password_valid {
        tracing::warn!(email = %user.email, "Login failed: bad password");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password.".into(),
        )));
    }

    let response = create_auth_response(&state, &user).await?;
    tracing::info!(user_id = user.id, "Login successful");
    Ok(Json(response))
}

/// POST /api/verify-token
///
/// Decode and validate a token supplied in the body, returning its identity.
pub async fn verify_token(
    State(state): State<AppState>,
    Json(input): Json<VerifyTokenRequest>,
) -> AppResult<Json<VerifyTokenResponse>> {
    let token = input.token.ok_or_else(|| {
        AppError::Core(CoreError::Validation("Token is required.".into()))
    })?;

    let claims = validate_token(&token, &state.config.jwt)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid token.".into())))?;

    Ok(Json(VerifyTokenResponse {
        user: TokenUser {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        },
    }))
}

/// POST /api/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
/// The presented token's session is revoked (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token.".into(),
            ))
        })?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("User no longer exists.".into()))
        })?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated.".into(),
        )));
    }

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "Logged out");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify a password, mapping hasher failures to an internal error.
fn verify_password(password: &str, user: &User) -> AppResult<bool> {
    crate::auth::password::verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
}

/// Generate access + refresh tokens, persist a session row, and build the
/// response.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &user.email, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    Ok(AuthResponse {
        token: access_token,
        refresh_token: refresh_plaintext,
        user: UserResponse::from(user),
    })
}
