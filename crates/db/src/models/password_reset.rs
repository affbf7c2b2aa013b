//! Password-reset token model and DTOs.

use sqlx::FromRow;
use timeclock_core::types::{DbId, Timestamp};

/// A one-time password-reset token from the `password_reset_tokens` table.
///
/// Stores only the SHA-256 hash of the token, never the plaintext.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for issuing a new reset token.
pub struct CreatePasswordReset {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
