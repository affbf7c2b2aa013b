//! Handlers for the work-log resource.
//!
//! Every clock action flows through `timeclock_core::worklog::apply_action`
//! exactly once, then the matching precondition-guarded repository write.
//! The client's idea of the current state is never trusted.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use timeclock_core::error::CoreError;
use timeclock_core::summary::{summarize, WorkSummary};
use timeclock_core::types::{DbId, Timestamp};
use timeclock_core::worklog::{apply_action, validate_times, LogAction, TransitionError};
use timeclock_db::models::work_log::{CreateCorrection, CreateWorkLog, WorkLog};
use timeclock_db::repositories::{CorrectionRepo, WorkLogRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/log-work`.
#[derive(Debug, Deserialize)]
pub struct LogWorkRequest {
    /// Optional echo of the caller's id; the token is authoritative and a
    /// mismatch is rejected.
    #[serde(rename = "employeeId")]
    pub employee_id: Option<DbId>,
    /// Action wire name, e.g. `"Start Work"`.
    #[serde(rename = "type")]
    pub action: String,
    pub description: Option<String>,
}

/// Request body for `PUT /api/work-logs/{id}`.
///
/// Only the supplied fields are overwritten, so a single-field correction
/// sends a single key.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateWorkLogRequest {
    pub start_time: Option<Timestamp>,
    pub break_start: Option<Timestamp>,
    pub break_end: Option<Timestamp>,
    pub finish_time: Option<Timestamp>,
    pub description: Option<String>,
}

/// A work-log row plus its derived dashboard metrics.
///
/// Field names match the stored columns; the derived metrics are flattened
/// alongside them and recomputed on every read.
#[derive(Debug, Serialize)]
pub struct WorkLogResponse {
    pub id: DbId,
    pub employee_id: DbId,
    pub date: NaiveDate,
    pub start_time: Option<Timestamp>,
    pub break_start: Option<Timestamp>,
    pub break_end: Option<Timestamp>,
    pub finish_time: Option<Timestamp>,
    pub description: Option<String>,
    #[serde(flatten)]
    pub summary: WorkSummary,
}

impl From<&WorkLog> for WorkLogResponse {
    fn from(log: &WorkLog) -> Self {
        Self {
            id: log.id,
            employee_id: log.employee_id,
            date: log.log_date,
            start_time: log.start_time,
            break_start: log.break_start,
            break_end: log.break_end,
            finish_time: log.finish_time,
            description: log.description.clone(),
            summary: summarize(&log.times()),
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/log-work
///
/// Apply one clock action to the caller's log for today. Returns the
/// updated row, or 409 with the rejection reason on an out-of-order action.
pub async fn log_work(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<LogWorkRequest>,
) -> AppResult<Json<WorkLogResponse>> {
    if let Some(claimed) = input.employee_id {
        if claimed != user.user_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Cannot log time for another employee.".into(),
            )));
        }
    }

    let action = LogAction::parse(&input.action).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown action type '{}'",
            input.action
        )))
    })?;

    let today = Utc::now().date_naive();
    let existing = WorkLogRepo::find_by_employee_and_date(&state.pool, user.user_id, today).await?;
    let times = existing.as_ref().map(|log| log.times());

    // The single authoritative transition check.
    apply_action(times.as_ref(), action)
        .map_err(|e| AppError::Core(CoreError::Conflict(e.to_string())))?;

    let updated = match action {
        LogAction::StartWork => {
            WorkLogRepo::create_started(
                &state.pool,
                &CreateWorkLog {
                    employee_id: user.user_id,
                    log_date: today,
                    description: input.description.clone(),
                },
            )
            .await?
        }
        LogAction::BreakStart => {
            WorkLogRepo::set_break_start(&state.pool, user.user_id, today).await?
        }
        LogAction::BreakEnd => WorkLogRepo::set_break_end(&state.pool, user.user_id, today).await?,
        LogAction::FinishWork => WorkLogRepo::set_finish(&state.pool, user.user_id, today).await?,
    };

    // The guarded write saw a row our read did not (a lost race); surface
    // the same rejection the check would have raised.
    let log = updated.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            TransitionError::for_action(action).to_string(),
        ))
    })?;

    tracing::info!(
        employee_id = user.user_id,
        action = action.as_str(),
        "Work log action applied"
    );
    Ok(Json(WorkLogResponse::from(&log)))
}

/// GET /api/work-log
///
/// The caller's log for today. 404 if no action was logged yet.
pub async fn get_today_log(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<WorkLogResponse>> {
    let today = Utc::now().date_naive();
    let log = WorkLogRepo::find_by_employee_and_date(&state.pool, user.user_id, today)
        .await?
        .ok_or_else(|| AppError::NotFound("No work log for today.".into()))?;

    Ok(Json(WorkLogResponse::from(&log)))
}

/// GET /api/work-logs
///
/// All work logs with derived metrics (admin only).
pub async fn list_work_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<WorkLogResponse>>> {
    let logs = WorkLogRepo::list(&state.pool).await?;
    Ok(Json(logs.iter().map(WorkLogResponse::from).collect()))
}

/// GET /api/employee/work-logs
///
/// The caller's work-log history with derived metrics.
pub async fn employee_work_logs(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<WorkLogResponse>>> {
    let logs = WorkLogRepo::list_for_employee(&state.pool, user.user_id).await?;
    Ok(Json(logs.iter().map(WorkLogResponse::from).collect()))
}

/// PUT /api/work-logs/{id}
///
/// Admin correction of a row. The full ordering invariant is re-validated
/// over the proposed timestamps before anything is overwritten, and every
/// applied change leaves an audit row.
pub async fn update_work_log(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWorkLogRequest>,
) -> AppResult<Json<WorkLogResponse>> {
    let log = WorkLogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WorkLog",
            id,
        }))?;

    if input.start_time.is_none()
        && input.break_start.is_none()
        && input.break_end.is_none()
        && input.finish_time.is_none()
        && input.description.is_none()
    {
        return Err(AppError::Core(CoreError::Validation(
            "No fields to update.".into(),
        )));
    }

    let current = log.times();
    let mut proposed = current;
    if let Some(t) = input.start_time {
        proposed.start_time = Some(t);
    }
    if let Some(t) = input.break_start {
        proposed.break_start = Some(t);
    }
    if let Some(t) = input.break_end {
        proposed.break_end = Some(t);
    }
    if let Some(t) = input.finish_time {
        proposed.finish_time = Some(t);
    }

    validate_times(&proposed).map_err(|msg| AppError::Core(CoreError::Conflict(msg)))?;

    let mut updated = log.clone();

    if proposed != current {
        updated = WorkLogRepo::update_times(&state.pool, id, &proposed)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "WorkLog",
                id,
            }))?;

        for (field, old, new) in [
            ("start_time", current.start_time, proposed.start_time),
            ("break_start", current.break_start, proposed.break_start),
            ("break_end", current.break_end, proposed.break_end),
            ("finish_time", current.finish_time, proposed.finish_time),
        ] {
            if old != new {
                record_correction(
                    &state,
                    id,
                    field,
                    old.map(|t| t.to_rfc3339()),
                    new.map(|t| t.to_rfc3339()),
                    admin.user_id,
                )
                .await?;
            }
        }
    }

    if let Some(description) = input.description {
        if Some(description.as_str()) != log.description.as_deref() {
            updated = WorkLogRepo::update_description(&state.pool, id, Some(&description))
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "WorkLog",
                    id,
                }))?;

            record_correction(
                &state,
                id,
                "description",
                log.description.clone(),
                Some(description),
                admin.user_id,
            )
            .await?;
        }
    }

    tracing::info!(work_log_id = id, corrected_by = admin.user_id, "Work log corrected");
    Ok(Json(WorkLogResponse::from(&updated)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Append one audit row for an applied correction.
async fn record_correction(
    state: &AppState,
    work_log_id: DbId,
    field: &str,
    old_value: Option<String>,
    new_value: Option<String>,
    corrected_by: DbId,
) -> AppResult<()> {
    CorrectionRepo::create(
        &state.pool,
        &CreateCorrection {
            work_log_id,
            field: field.to_string(),
            old_value,
            new_value,
            corrected_by,
        },
    )
    .await?;
    Ok(())
}
