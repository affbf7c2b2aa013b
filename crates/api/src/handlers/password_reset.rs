//! Handlers for the password-reset flow.
//!
//! Reset tokens are opaque, one-time, and short-lived; only their SHA-256
//! digest is stored. The request endpoint answers 200 whether or not the
//! account exists.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use timeclock_core::error::CoreError;
use timeclock_db::models::password_reset::CreatePasswordReset;
use timeclock_db::repositories::{PasswordResetRepo, SessionRepo, UserRepo};
use uuid::Uuid;
use validator::Validate;

use crate::auth::jwt::hash_token;
use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Reset token lifetime in minutes.
const RESET_TOKEN_EXPIRY_MINS: i64 = 60;

/// Minimum password length enforced on password updates.
const MIN_PASSWORD_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/reset-password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,
}

/// Request body for `POST /api/update-password`.
#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub token: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// Generic `{ message }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/reset-password
///
/// Issue a one-time reset token for the account, if it exists, and send it
/// by email. The response never reveals whether the account exists.
pub async fn request_reset(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    if let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        if user.is_active {
            let token = Uuid::new_v4().to_string();
            PasswordResetRepo::create(
                &state.pool,
                &CreatePasswordReset {
                    user_id: user.id,
                    token_hash: hash_token(&token),
                    expires_at: Utc::now() + chrono::Duration::minutes(RESET_TOKEN_EXPIRY_MINS),
                },
            )
            .await?;

            match &state.mailer {
                Some(mailer) => {
                    // A delivery failure must not change the response, or the
                    // endpoint becomes an account-existence oracle.
                    if let Err(e) = mailer.send_password_reset(&user.email, &token).await {
                        tracing::error!(user_id = user.id, error = %e, "Reset email failed");
                    }
                }
                None => {
                    tracing::info!(
                        user_id = user.id,
                        reset_token = %token,
                        "SMTP not configured; logging reset token"
                    );
                }
            }
        }
    }

    Ok(Json(MessageResponse {
        message: "If the account exists, a password reset link has been sent.".into(),
    }))
}

/// POST /api/update-password
///
/// Consume a reset token and set the new password. All of the user's
/// sessions are revoked afterwards.
pub async fn update_password(
    State(state): State<AppState>,
    Json(input): Json<UpdatePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let reset = PasswordResetRepo::find_valid_by_hash(&state.pool, &hash_token(&input.token))
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired reset token.".into(),
            ))
        })?;

    // Single-winner consumption; a concurrent use of the same token loses.
    let consumed = PasswordResetRepo::mark_used(&state.pool, reset.id).await?;
    if !consumed {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid or expired reset token.".into(),
        )));
    }

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::update_password(&state.pool, reset.user_id, &hashed).await?;
    if !updated {
        return Err(AppError::InternalError(
            "Reset token references a missing user".into(),
        ));
    }

    let revoked = SessionRepo::revoke_all_for_user(&state.pool, reset.user_id).await?;
    tracing::info!(user_id = reset.user_id, revoked, "Password updated");

    Ok(Json(MessageResponse {
        message: "Password updated successfully.".into(),
    }))
}
