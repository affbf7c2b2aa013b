//! Work-log state machine.
//!
//! Tracks the per-employee, per-day sequence start -> break-start ->
//! break-end -> finish. [`apply_action`] is the single authoritative
//! transition function: every clock action goes through it exactly once,
//! server-side, before anything is written. Client-side button state is a
//! UI hint only.

use crate::types::Timestamp;

/// A clock action requested by an employee.
///
/// Wire names are the human-readable strings the original kiosk flow sends
/// (`"Start Work"`, `"Break Start"`, `"Break End"`, `"Finish Work"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogAction {
    StartWork,
    BreakStart,
    BreakEnd,
    FinishWork,
}

impl LogAction {
    /// Parse the wire name of an action. Returns `None` for unknown input.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Start Work" => Some(Self::StartWork),
            "Break Start" => Some(Self::BreakStart),
            "Break End" => Some(Self::BreakEnd),
            "Finish Work" => Some(Self::FinishWork),
            _ => None,
        }
    }

    /// The wire name of this action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StartWork => "Start Work",
            Self::BreakStart => "Break Start",
            Self::BreakEnd => "Break End",
            Self::FinishWork => "Finish Work",
        }
    }
}

/// The timestamp field an accepted action assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogField {
    StartTime,
    BreakStart,
    BreakEnd,
    FinishTime,
}

impl LogField {
    /// The `work_logs` column this field maps to.
    pub fn column(self) -> &'static str {
        match self {
            Self::StartTime => "start_time",
            Self::BreakStart => "break_start",
            Self::BreakEnd => "break_end",
            Self::FinishTime => "finish_time",
        }
    }
}

/// The four nullable timestamps of a day's work log.
///
/// A plain value type so the state machine stays independent of the
/// database row representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkLogTimes {
    pub start_time: Option<Timestamp>,
    pub break_start: Option<Timestamp>,
    pub break_end: Option<Timestamp>,
    pub finish_time: Option<Timestamp>,
}

/// Derived state of a day's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogState {
    /// No row yet, or no start time recorded.
    Empty,
    /// Work started, no break taken yet.
    Started,
    /// A break is active.
    OnBreak,
    /// The day's break has ended.
    BreakDone,
    /// Work finished.
    Finished,
}

/// Derive the current state from a day's (possibly absent) log.
pub fn state_of(times: Option<&WorkLogTimes>) -> LogState {
    let Some(t) = times else {
        return LogState::Empty;
    };
    if t.start_time.is_none() {
        return LogState::Empty;
    }
    if t.finish_time.is_some() {
        return LogState::Finished;
    }
    match (t.break_start, t.break_end) {
        (Some(_), None) => LogState::OnBreak,
        (Some(_), Some(_)) => LogState::BreakDone,
        (None, _) => LogState::Started,
    }
}

/// Rejection of an out-of-order clock action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("already started")]
    AlreadyStarted,

    #[error("work not started or break already active")]
    BreakStartNotAllowed,

    #[error("break not started, already ended, or work finished")]
    BreakEndNotAllowed,

    #[error("work not started or already finished")]
    FinishNotAllowed,
}

impl TransitionError {
    /// The rejection raised when `action`'s precondition does not hold.
    ///
    /// Also used when a guarded write loses a race: the row the guard saw
    /// no longer satisfies the precondition, which is the same rejection.
    pub fn for_action(action: LogAction) -> Self {
        match action {
            LogAction::StartWork => Self::AlreadyStarted,
            LogAction::BreakStart => Self::BreakStartNotAllowed,
            LogAction::BreakEnd => Self::BreakEndNotAllowed,
            LogAction::FinishWork => Self::FinishNotAllowed,
        }
    }
}

/// Decide whether `action` is legal against the day's current log.
///
/// Returns the field the action assigns (set to the current time by the
/// caller), or the rejection reason. Each field is settable at most once
/// per day, so re-submitting an applied action can never overwrite the
/// original timestamp.
pub fn apply_action(
    times: Option<&WorkLogTimes>,
    action: LogAction,
) -> Result<LogField, TransitionError> {
    let t = times.copied().unwrap_or_default();

    let allowed = match action {
        LogAction::StartWork => t.start_time.is_none(),
        LogAction::BreakStart => t.start_time.is_some() && t.break_start.is_none(),
        LogAction::BreakEnd => {
            t.break_start.is_some() && t.break_end.is_none() && t.finish_time.is_none()
        }
        LogAction::FinishWork => t.start_time.is_some() && t.finish_time.is_none(),
    };

    if !allowed {
        return Err(TransitionError::for_action(action));
    }

    Ok(match action {
        LogAction::StartWork => LogField::StartTime,
        LogAction::BreakStart => LogField::BreakStart,
        LogAction::BreakEnd => LogField::BreakEnd,
        LogAction::FinishWork => LogField::FinishTime,
    })
}

/// Validate the ordering invariant over a full set of timestamps.
///
/// Used by the correction path: admin edits go through this check before
/// any field is overwritten, so an edit can never produce a row the action
/// path could not have reached (e.g. break_end before break_start).
pub fn validate_times(t: &WorkLogTimes) -> Result<(), String> {
    if let Some(bs) = t.break_start {
        let Some(start) = t.start_time else {
            return Err("break_start requires start_time to be set".into());
        };
        if bs < start {
            return Err("break_start must not precede start_time".into());
        }
    }
    if let Some(be) = t.break_end {
        let Some(bs) = t.break_start else {
            return Err("break_end requires break_start to be set".into());
        };
        if be < bs {
            return Err("break_end must not precede break_start".into());
        }
    }
    if let Some(finish) = t.finish_time {
        let Some(start) = t.start_time else {
            return Err("finish_time requires start_time to be set".into());
        };
        if finish < start {
            return Err("finish_time must not precede start_time".into());
        }
        if let Some(be) = t.break_end {
            if finish < be {
                return Err("finish_time must not precede break_end".into());
            }
        }
    }
    Ok(())
}
