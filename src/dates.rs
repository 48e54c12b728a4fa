//! Listing date resolution and lookback-window filtering.
//!
//! Listing cards show dates either as `March 04, 2025` or `03/04/2025`.
//! Anything else, including an empty string, resolves to the run date and is
//! flagged as unknown so downstream consumers can tell the two apart.

use crate::error::DateParseError;
use chrono::{Days, NaiveDate};
use tracing::debug;

/// Lookback window applied when none is configured.
pub const DEFAULT_WINDOW_DAYS: i64 = 14;

const DATE_FORMATS: [&str; 2] = ["%B %d, %Y", "%m/%d/%Y"];

/// A calendar date resolved from listing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    /// `false` when the date defaulted to `now`.
    pub known: bool,
}

fn parse_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| DateParseError {
            raw: raw.to_string(),
        })
}

/// Resolve listing time text to a date, defaulting to `now`.
pub fn resolve_date(raw_time: &str, now: NaiveDate) -> ResolvedDate {
    if raw_time.trim().is_empty() {
        return ResolvedDate {
            date: now,
            known: false,
        };
    }
    match parse_date(raw_time) {
        Ok(date) => ResolvedDate { date, known: true },
        Err(e) => {
            debug!(error = %e, "Defaulting date to run date");
            ResolvedDate {
                date: now,
                known: false,
            }
        }
    }
}

/// Earliest date kept by a window of `window_days`.
///
/// `None` when the window is negative or reaches past the earliest
/// representable date.
pub fn cutoff(now: NaiveDate, window_days: i64) -> Option<NaiveDate> {
    let days = u64::try_from(window_days).ok()?;
    now.checked_sub_days(Days::new(days))
}

/// `true` unless `date` is strictly earlier than `now - window_days`.
///
/// A window reaching past the earliest representable date keeps everything.
pub fn is_within_window(date: NaiveDate, now: NaiveDate, window_days: i64) -> bool {
    match cutoff(now, window_days) {
        Some(cutoff) => date >= cutoff,
        None => window_days >= 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 18).unwrap()
    }

    #[test]
    fn test_resolve_month_day_year() {
        let resolved = resolve_date("March 04, 2025", now());
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert!(resolved.known);
    }

    #[test]
    fn test_resolve_slash_format() {
        let resolved = resolve_date("02/27/2025", now());
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2025, 2, 27).unwrap());
        assert!(resolved.known);
    }

    #[test]
    fn test_resolve_trims_surrounding_whitespace() {
        let resolved = resolve_date("  December 31, 2024 \n", now());
        assert_eq!(resolved.date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_resolve_defaults_to_now() {
        for raw in ["", "   ", "10:30 ET", "2025-03-04", "Mar 4 2025", "13/45/2025"] {
            let resolved = resolve_date(raw, now());
            assert_eq!(resolved.date, now(), "raw = {raw:?}");
            assert!(!resolved.known, "raw = {raw:?}");
        }
    }

    #[test]
    fn test_window_boundary() {
        let day = |n: i64| now() - Duration::days(n);
        assert!(is_within_window(day(13), now(), DEFAULT_WINDOW_DAYS));
        assert!(is_within_window(day(14), now(), DEFAULT_WINDOW_DAYS));
        assert!(!is_within_window(day(15), now(), DEFAULT_WINDOW_DAYS));
    }

    #[test]
    fn test_huge_window_does_not_overflow() {
        assert_eq!(cutoff(now(), 1_000_000_000_000), None);
        assert_eq!(cutoff(now(), i64::MAX), None);
        assert!(is_within_window(now(), now(), 1_000_000_000_000));
        assert!(is_within_window(NaiveDate::MIN, now(), i64::MAX));
    }

    #[test]
    fn test_negative_window_has_no_cutoff() {
        assert_eq!(cutoff(now(), -1), None);
        assert!(!is_within_window(now(), now(), -1));
    }

    #[test]
    fn test_window_keeps_today_and_future() {
        assert!(is_within_window(now(), now(), DEFAULT_WINDOW_DAYS));
        assert!(is_within_window(now() + Duration::days(1), now(), DEFAULT_WINDOW_DAYS));
    }
}
