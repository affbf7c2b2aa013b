//! Dashboard derivations over a day's work log.
//!
//! Pure, stateless, recomputed on every read. Nothing here is persisted.
//! The string formats ("8.50", "30", "0 Hr 30 Min", "-" for missing
//! endpoints) are the dashboard display contract.

use serde::Serialize;

use crate::types::Timestamp;
use crate::worklog::WorkLogTimes;

/// Hours in a standard working day; anything above counts as overtime.
const STANDARD_DAY_HOURS: f64 = 8.0;

/// Display placeholder when an endpoint needed for a derivation is missing.
const MISSING: &str = "-";

/// Derived display metrics for one work-log row.
#[derive(Debug, Clone, Serialize)]
pub struct WorkSummary {
    /// Hours between start and finish, 2 decimals, or "-".
    pub worked_hours: String,
    /// Whole minutes between break start and end, or "-".
    pub break_minutes: String,
    /// Time above the 8-hour day as "H Hr M Min".
    pub overtime: String,
}

/// Compute all derived metrics for a day's log.
pub fn summarize(t: &WorkLogTimes) -> WorkSummary {
    WorkSummary {
        worked_hours: worked_hours(t.start_time, t.finish_time),
        break_minutes: break_minutes(t.break_start, t.break_end),
        overtime: overtime(t.start_time, t.finish_time),
    }
}

/// `(finish - start)` in hours, rounded to 2 decimals. "-" if either
/// endpoint is missing.
pub fn worked_hours(start: Option<Timestamp>, finish: Option<Timestamp>) -> String {
    match hours_between(start, finish) {
        Some(hours) => format!("{hours:.2}"),
        None => MISSING.to_string(),
    }
}

/// `(break_end - break_start)` in whole minutes. "-" if either endpoint is
/// missing.
pub fn break_minutes(break_start: Option<Timestamp>, break_end: Option<Timestamp>) -> String {
    match (break_start, break_end) {
        (Some(bs), Some(be)) => {
            let minutes = (be - bs).num_seconds() as f64 / 60.0;
            format!("{}", minutes.round() as i64)
        }
        _ => MISSING.to_string(),
    }
}

/// Time worked beyond the standard 8-hour day, formatted "H Hr M Min".
///
/// "0 Hr 0 Min" when the day is not computable or at/under 8 hours.
pub fn overtime(start: Option<Timestamp>, finish: Option<Timestamp>) -> String {
    let Some(worked) = hours_between(start, finish) else {
        return "0 Hr 0 Min".to_string();
    };
    if worked <= STANDARD_DAY_HOURS {
        return "0 Hr 0 Min".to_string();
    }
    let over = worked - STANDARD_DAY_HOURS;
    let hours = over.floor();
    let minutes = ((over - hours) * 60.0).round() as i64;
    format!("{} Hr {} Min", hours as i64, minutes)
}

fn hours_between(start: Option<Timestamp>, finish: Option<Timestamp>) -> Option<f64> {
    let (start, finish) = (start?, finish?);
    Some((finish - start).num_seconds() as f64 / 3600.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(hour: u32, min: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, min, 0).unwrap()
    }

    #[test]
    fn test_worked_hours_standard_day() {
        // 09:00 -> 17:30 is 8.5 hours.
        assert_eq!(worked_hours(Some(at(9, 0)), Some(at(17, 30))), "8.50");
    }

    #[test]
    fn test_worked_hours_missing_endpoint() {
        assert_eq!(worked_hours(Some(at(9, 0)), None), "-");
        assert_eq!(worked_hours(None, Some(at(17, 30))), "-");
        assert_eq!(worked_hours(None, None), "-");
    }

    #[test]
    fn test_break_minutes() {
        assert_eq!(break_minutes(Some(at(12, 0)), Some(at(12, 30))), "30");
        assert_eq!(break_minutes(Some(at(12, 0)), None), "-");
    }

    #[test]
    fn test_overtime_half_hour() {
        // 8.5 worked hours -> 30 minutes of overtime.
        assert_eq!(overtime(Some(at(9, 0)), Some(at(17, 30))), "0 Hr 30 Min");
    }

    #[test]
    fn test_overtime_under_eight_hours() {
        assert_eq!(overtime(Some(at(9, 0)), Some(at(16, 0))), "0 Hr 0 Min");
    }

    #[test]
    fn test_overtime_exactly_eight_hours() {
        assert_eq!(overtime(Some(at(9, 0)), Some(at(17, 0))), "0 Hr 0 Min");
    }

    #[test]
    fn test_overtime_multi_hour() {
        // 09:00 -> 19:15 is 10.25 hours: 2 Hr 15 Min over.
        assert_eq!(overtime(Some(at(9, 0)), Some(at(19, 15))), "2 Hr 15 Min");
    }

    #[test]
    fn test_overtime_missing_endpoint() {
        assert_eq!(overtime(Some(at(9, 0)), None), "0 Hr 0 Min");
    }

    #[test]
    fn test_summarize_full_day() {
        let t = WorkLogTimes {
            start_time: Some(at(9, 0)),
            break_start: Some(at(12, 0)),
            break_end: Some(at(12, 30)),
            finish_time: Some(at(17, 30)),
        };
        let summary = summarize(&t);
        assert_eq!(summary.worked_hours, "8.50");
        assert_eq!(summary.break_minutes, "30");
        assert_eq!(summary.overtime, "0 Hr 30 Min");
    }

    #[test]
    fn test_summarize_day_in_progress() {
        let t = WorkLogTimes {
            start_time: Some(at(9, 0)),
            ..Default::default()
        };
        let summary = summarize(&t);
        assert_eq!(summary.worked_hours, "-");
        assert_eq!(summary.break_minutes, "-");
        assert_eq!(summary.overtime, "0 Hr 0 Min");
    }
}
