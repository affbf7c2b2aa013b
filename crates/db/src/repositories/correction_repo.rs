//! Repository for the `work_log_corrections` audit table.

use sqlx::PgPool;
use timeclock_core::types::DbId;

use crate::models::work_log::{CreateCorrection, WorkLogCorrection};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, work_log_id, field, old_value, new_value, corrected_by, created_at";

/// Append-only audit trail of admin corrections.
pub struct CorrectionRepo;

impl CorrectionRepo {
    /// Record one field correction, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCorrection,
    ) -> Result<WorkLogCorrection, sqlx::Error> {
        let query = format!(
            "INSERT INTO work_log_corrections (work_log_id, field, old_value, new_value, corrected_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkLogCorrection>(&query)
            .bind(input.work_log_id)
            .bind(&input.field)
            .bind(&input.old_value)
            .bind(&input.new_value)
            .bind(input.corrected_by)
            .fetch_one(pool)
            .await
    }

    /// List all corrections for a work log, oldest first.
    pub async fn list_for_log(
        pool: &PgPool,
        work_log_id: DbId,
    ) -> Result<Vec<WorkLogCorrection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_log_corrections
             WHERE work_log_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, WorkLogCorrection>(&query)
            .bind(work_log_id)
            .fetch_all(pool)
            .await
    }
}
