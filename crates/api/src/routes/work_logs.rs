//! Route definitions for the work-log resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::work_logs;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// POST /log-work             -> log_work (requires auth)
/// GET  /work-log             -> get_today_log (requires auth)
/// GET  /work-logs            -> list_work_logs (admin only)
/// PUT  /work-logs/{id}       -> update_work_log (admin only)
/// GET  /employee/work-logs   -> employee_work_logs (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/log-work", post(work_logs::log_work))
        .route("/work-log", get(work_logs::get_today_log))
        .route("/work-logs", get(work_logs::list_work_logs))
        .route("/work-logs/{id}", put(work_logs::update_work_log))
        .route("/employee/work-logs", get(work_logs::employee_work_logs))
}
