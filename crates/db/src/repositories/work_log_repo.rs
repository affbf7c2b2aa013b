//! Repository for the `work_logs` table.
//!
//! Transition writes are precondition-guarded: each statement re-states its
//! action's guard in the WHERE clause and returns no row when the guard no
//! longer holds. Combined with the `(employee_id, log_date)` unique
//! constraint this makes concurrent duplicate actions lose cleanly -- of
//! two racing "Start Work" requests exactly one inserts a row.

use chrono::NaiveDate;
use sqlx::PgPool;
use timeclock_core::types::DbId;
use timeclock_core::worklog::WorkLogTimes;

use crate::models::work_log::{CreateWorkLog, WorkLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, employee_id, log_date, start_time, break_start, break_end, \
                        finish_time, description, created_at, updated_at";

/// Provides guarded state-machine writes and reads for work logs.
pub struct WorkLogRepo;

impl WorkLogRepo {
    /// Insert the day's row with `start_time = NOW()`.
    ///
    /// Returns `None` if a row for `(employee_id, log_date)` already exists
    /// (the caller lost a race or the day was already started).
    pub async fn create_started(
        pool: &PgPool,
        input: &CreateWorkLog,
    ) -> Result<Option<WorkLog>, sqlx::Error> {
        let query = format!(
            "INSERT INTO work_logs (employee_id, log_date, start_time, description)
             VALUES ($1, $2, NOW(), $3)
             ON CONFLICT (employee_id, log_date) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkLog>(&query)
            .bind(input.employee_id)
            .bind(input.log_date)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Set `break_start = NOW()` if work has started and no break exists yet.
    pub async fn set_break_start(
        pool: &PgPool,
        employee_id: DbId,
        log_date: NaiveDate,
    ) -> Result<Option<WorkLog>, sqlx::Error> {
        let query = format!(
            "UPDATE work_logs SET break_start = NOW()
             WHERE employee_id = $1 AND log_date = $2
               AND start_time IS NOT NULL
               AND break_start IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkLog>(&query)
            .bind(employee_id)
            .bind(log_date)
            .fetch_optional(pool)
            .await
    }

    /// Set `break_end = NOW()` if a break is active and work is unfinished.
    pub async fn set_break_end(
        pool: &PgPool,
        employee_id: DbId,
        log_date: NaiveDate,
    ) -> Result<Option<WorkLog>, sqlx::Error> {
        let query = format!(
            "UPDATE work_logs SET break_end = NOW()
             WHERE employee_id = $1 AND log_date = $2
               AND break_start IS NOT NULL
               AND break_end IS NULL
               AND finish_time IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkLog>(&query)
            .bind(employee_id)
            .bind(log_date)
            .fetch_optional(pool)
            .await
    }

    /// Set `finish_time = NOW()` if work has started and is unfinished.
    pub async fn set_finish(
        pool: &PgPool,
        employee_id: DbId,
        log_date: NaiveDate,
    ) -> Result<Option<WorkLog>, sqlx::Error> {
        let query = format!(
            "UPDATE work_logs SET finish_time = NOW()
             WHERE employee_id = $1 AND log_date = $2
               AND start_time IS NOT NULL
               AND finish_time IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkLog>(&query)
            .bind(employee_id)
            .bind(log_date)
            .fetch_optional(pool)
            .await
    }

    /// Find a work log by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_logs WHERE id = $1");
        sqlx::query_as::<_, WorkLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find one employee's log for one day.
    pub async fn find_by_employee_and_date(
        pool: &PgPool,
        employee_id: DbId,
        log_date: NaiveDate,
    ) -> Result<Option<WorkLog>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM work_logs WHERE employee_id = $1 AND log_date = $2");
        sqlx::query_as::<_, WorkLog>(&query)
            .bind(employee_id)
            .bind(log_date)
            .fetch_optional(pool)
            .await
    }

    /// List all work logs, most recent day first.
    pub async fn list(pool: &PgPool) -> Result<Vec<WorkLog>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM work_logs ORDER BY log_date DESC, employee_id");
        sqlx::query_as::<_, WorkLog>(&query).fetch_all(pool).await
    }

    /// List one employee's work logs, most recent day first.
    pub async fn list_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<WorkLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_logs WHERE employee_id = $1 ORDER BY log_date DESC"
        );
        sqlx::query_as::<_, WorkLog>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite all four timestamps (correction path).
    ///
    /// Callers must have validated the ordering invariant over the full
    /// proposed set first; this statement applies it verbatim.
    pub async fn update_times(
        pool: &PgPool,
        id: DbId,
        times: &WorkLogTimes,
    ) -> Result<Option<WorkLog>, sqlx::Error> {
        let query = format!(
            "UPDATE work_logs SET
                start_time = $2,
                break_start = $3,
                break_end = $4,
                finish_time = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkLog>(&query)
            .bind(id)
            .bind(times.start_time)
            .bind(times.break_start)
            .bind(times.break_end)
            .bind(times.finish_time)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the free-text description (correction path).
    pub async fn update_description(
        pool: &PgPool,
        id: DbId,
        description: Option<&str>,
    ) -> Result<Option<WorkLog>, sqlx::Error> {
        let query = format!(
            "UPDATE work_logs SET description = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkLog>(&query)
            .bind(id)
            .bind(description)
            .fetch_optional(pool)
            .await
    }
}
