pub mod auth;
pub mod health;
pub mod work_logs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                     login (public)
/// /verify-token              decode + validate a token (public)
/// /refresh                   rotate a refresh token (public)
/// /logout                    revoke the caller's sessions (requires auth)
/// /reset-password            request a reset token (public)
/// /update-password           consume a reset token (public)
///
/// /log-work                  apply one clock action (requires auth)
/// /work-log                  the caller's log for today (requires auth)
/// /work-logs                 all logs (admin only)
/// /work-logs/{id}            correction (PUT, admin only)
/// /employee/work-logs        the caller's log history (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(work_logs::router())
}
