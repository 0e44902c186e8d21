//! Temporal safeguard for calendar writes.
//!
//! The remote calendar accepts past-dated events, so every push and delete
//! is checked locally first. Only the local calendar date takes part in the
//! comparison; time of day is ignored. "Today" is always passed in by the
//! caller, [`local_today`] being the single place the wall clock is read.

use crate::{Error, Result, WorkoutPlan};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Default time of day applied to date-only start values (09:00)
pub fn default_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// True when `candidate` is today or later
pub fn is_allowed_date(candidate: NaiveDate, today: NaiveDate) -> bool {
    candidate >= today
}

/// Last local check before a plan is handed to the push collaborator
pub fn authorize_push(plan: &WorkoutPlan, today: NaiveDate) -> Result<()> {
    authorize("Publishing a workout", plan.start.date(), today)
}

/// Deleting a calendar event is only allowed for today or later
pub fn authorize_delete(event_start: NaiveDateTime, today: NaiveDate) -> Result<()> {
    authorize("Deleting an event", event_start.date(), today)
}

fn authorize(action: &'static str, date: NaiveDate, today: NaiveDate) -> Result<()> {
    if is_allowed_date(date, today) {
        Ok(())
    } else {
        tracing::warn!("Safeguard blocked: {} dated {} (today {})", action, date, today);
        Err(Error::PastDate {
            action,
            date,
            today,
        })
    }
}

/// Parse a local start value.
///
/// Accepts `YYYY-MM-DD` (combined with `default_time`),
/// `YYYY-MM-DDTHH:MM[:SS]`, or an RFC 3339 timestamp whose local wall time
/// is kept as-is.
pub fn parse_local_start(raw: &str, default_time: NaiveTime) -> Result<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(default_time));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(start) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(start);
        }
    }
    if let Ok(start) = DateTime::parse_from_rfc3339(raw) {
        return Ok(start.naive_local());
    }

    Err(Error::Schema(format!("invalid start date {:?}", raw)))
}

/// Today's date in the machine's local timezone
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
