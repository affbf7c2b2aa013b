//! Route definitions for authentication and password reset.

use axum::routing::post;
use axum::Router;

use crate::handlers::{auth, password_reset};
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// POST /login            -> login
/// POST /verify-token     -> verify_token
/// POST /refresh          -> refresh
/// POST /logout           -> logout (requires auth)
/// POST /reset-password   -> request_reset
/// POST /update-password  -> update_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/verify-token", post(auth::verify_token))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/reset-password", post(password_reset::request_reset))
        .route("/update-password", post(password_reset::update_password))
}
