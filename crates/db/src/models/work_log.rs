//! Work-log entity model and DTOs.

use chrono::NaiveDate;
use sqlx::FromRow;
use timeclock_core::types::{DbId, Timestamp};
use timeclock_core::worklog::WorkLogTimes;

/// One employee's log for one day, from the `work_logs` table.
///
/// The four timestamps are nullable and filled in strictly through the
/// state machine; `(employee_id, log_date)` is unique.
#[derive(Debug, Clone, FromRow)]
pub struct WorkLog {
    pub id: DbId,
    pub employee_id: DbId,
    pub log_date: NaiveDate,
    pub start_time: Option<Timestamp>,
    pub break_start: Option<Timestamp>,
    pub break_end: Option<Timestamp>,
    pub finish_time: Option<Timestamp>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl WorkLog {
    /// The row's four timestamps as the state machine's value type.
    pub fn times(&self) -> WorkLogTimes {
        WorkLogTimes {
            start_time: self.start_time,
            break_start: self.break_start,
            break_end: self.break_end,
            finish_time: self.finish_time,
        }
    }
}

/// DTO for creating a day's row on the first "Start Work" action.
#[derive(Debug)]
pub struct CreateWorkLog {
    pub employee_id: DbId,
    pub log_date: NaiveDate,
    pub description: Option<String>,
}

/// Audit row from the `work_log_corrections` table.
///
/// Written by the admin correction path only; append-only.
#[derive(Debug, Clone, FromRow)]
pub struct WorkLogCorrection {
    pub id: DbId,
    pub work_log_id: DbId,
    /// Name of the corrected column (e.g. `"break_end"`, `"description"`).
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub corrected_by: DbId,
    pub created_at: Timestamp,
}

/// DTO for recording one field correction.
#[derive(Debug)]
pub struct CreateCorrection {
    pub work_log_id: DbId,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub corrected_by: DbId,
}
