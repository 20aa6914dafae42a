//! Normalization of user-supplied date inputs into concrete Unix windows

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::constants::DEFAULT_LOOKBACK_SECS;
use crate::error::TimeRangeError;

/// Optional `[start, end)` bounds for a historical query
///
/// Bounds are human-readable date strings. An absent end means "now"; an
/// absent start means two days before the end. Date-only and naive datetime
/// strings are interpreted as UTC.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeRange {
    start: Option<String>,
    end: Option<String>,
}

impl TimeRange {
    /// Window ending now and starting two days earlier
    pub fn last_two_days() -> Self {
        Self::default()
    }

    /// Window from `start` until now
    pub fn since(start: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: None,
        }
    }

    /// Window ending at `end`, starting two days earlier
    pub fn until(end: impl Into<String>) -> Self {
        Self {
            start: None,
            end: Some(end.into()),
        }
    }

    /// Window between two explicit bounds
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Resolves the bounds against the current wall clock
    ///
    /// Returns `(start, end)` Unix seconds with `start < end`.
    pub fn resolve(&self) -> Result<(i64, i64), TimeRangeError> {
        self.resolve_at(Utc::now().timestamp())
    }

    /// Resolves the bounds against an explicit "now", in Unix seconds
    pub fn resolve_at(&self, now: i64) -> Result<(i64, i64), TimeRangeError> {
        let end = match &self.end {
            Some(input) => parse_epoch(input)?,
            None => now,
        };
        let start = match &self.start {
            Some(input) => parse_epoch(input)?,
            None => end - DEFAULT_LOOKBACK_SECS,
        };
        if start >= end {
            return Err(TimeRangeError::EmptyWindow { start, end });
        }
        Ok((start, end))
    }
}

/// Parses a date string into Unix seconds
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD`; the latter two
/// are taken as UTC, date-only input as midnight.
fn parse_epoch(input: &str) -> Result<i64, TimeRangeError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc().timestamp());
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp());
    }
    Err(TimeRangeError::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_bounds_default_to_a_two_day_lookback() {
        let (start, end) = TimeRange::default().resolve_at(1_700_000_000).unwrap();
        assert_eq!(end, 1_700_000_000);
        assert_eq!(start, end - 172_800);
    }

    #[test]
    fn wall_clock_end_is_now() {
        let before = Utc::now().timestamp();
        let (start, end) = TimeRange::last_two_days().resolve().unwrap();
        let after = Utc::now().timestamp();
        assert!(end >= before && end <= after);
        assert_eq!(start, end - 172_800);
    }

    #[test]
    fn date_only_bounds_resolve_to_utc_midnights() {
        let (start, end) = TimeRange::between("2022-12-01", "2022-12-03")
            .resolve_at(0)
            .unwrap();
        assert_eq!(start, 1_669_852_800);
        assert_eq!(end, 1_670_025_600);
    }

    #[test]
    fn ordered_inputs_resolve_ordered() {
        let (start, end) = TimeRange::between("2021-01-15", "2023-06-30")
            .resolve_at(0)
            .unwrap();
        assert!(start < end);
    }

    #[test]
    fn accepts_naive_datetime_and_rfc3339() {
        let (start, end) = TimeRange::between("2022-12-01 06:30:00", "2022-12-01T12:00:00Z")
            .resolve_at(0)
            .unwrap();
        assert_eq!(start, 1_669_852_800 + 6 * 3600 + 30 * 60);
        assert_eq!(end, 1_669_852_800 + 12 * 3600);
    }

    #[test]
    fn end_only_window_starts_two_days_earlier() {
        let (start, end) = TimeRange::until("2022-12-03").resolve_at(0).unwrap();
        assert_eq!(end, 1_670_025_600);
        assert_eq!(start, end - 172_800);
    }

    #[test]
    fn garbage_input_is_a_caller_error() {
        let err = TimeRange::since("not a date")
            .resolve_at(1_700_000_000)
            .unwrap_err();
        assert!(matches!(err, TimeRangeError::InvalidDate(_)));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let err = TimeRange::between("2022-12-03", "2022-12-01")
            .resolve_at(0)
            .unwrap_err();
        assert!(matches!(err, TimeRangeError::EmptyWindow { .. }));
    }
}
