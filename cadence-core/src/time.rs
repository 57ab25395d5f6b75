//! Deadline parsing and day arithmetic.
//!
//! No time zones. A deadline is compared against midnight of the plan date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const SECS_PER_DAY: i64 = 86_400;

/// Parse a deadline written as `YYYY-MM-DD`, an RFC 3339 timestamp, or a
/// local `YYYY-MM-DDTHH:MM[:SS]` / `YYYY-MM-DD HH:MM` datetime.
pub fn parse_deadline(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Whole days from midnight of `today` until the deadline, rounded up.
/// `None` when the deadline cannot be parsed.
pub fn days_until(raw: &str, today: NaiveDate) -> Option<i64> {
    let deadline = parse_deadline(raw)?;
    let midnight = today.and_hms_opt(0, 0, 0)?;
    let secs = (deadline - midnight).num_seconds();
    let days = secs.div_euclid(SECS_PER_DAY);
    Some(if secs.rem_euclid(SECS_PER_DAY) > 0 { days + 1 } else { days })
}
