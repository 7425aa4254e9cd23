//! Calendar-day ordering against the scan window.
//!
//! The portal renders day cells with a short date label ("Jun 2") and a
//! weekday label ("Monday"). The labels carry no year, so the year is
//! inferred from the current month, handling the December→January rollover
//! in both directions. Days are then classified against the fixed scan
//! window of today through thirty days out.

use crate::config::BotConfig;
use chrono::{Datelike, Duration, NaiveDate};

/// Dummy year used while parsing "%b %d" labels. Must be a leap year so
/// "Feb 29" survives the intermediate parse.
const PARSE_YEAR: i32 = 2024;

/// The date range within which calendar days are evaluated.
///
/// Always `[today, today + 30 days]`; nothing about past or future claims
/// is persisted, the remote site is the sole source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ScanWindow {
    pub fn next_30_days(today: NaiveDate) -> Self {
        Self {
            start: today,
            end: today + Duration::days(30),
        }
    }
}

/// Resolve a rendered date label like `"Jun 2"` to a full date.
///
/// Year inference: a January label seen in December belongs to next year,
/// a December label seen in January belongs to last year; everything else
/// is the current year. Returns `None` for labels that don't parse (or
/// that don't exist in the inferred year, e.g. "Feb 29" off-leap-year).
pub fn infer_date(label: &str, today: NaiveDate) -> Option<NaiveDate> {
    let cleaned = label.replace('\n', " ");
    let padded = format!("{} {}", cleaned.trim(), PARSE_YEAR);
    let parsed = NaiveDate::parse_from_str(&padded, "%b %d %Y").ok()?;

    let mut year = today.year();
    if today.month() == 12 && parsed.month() == 1 {
        year += 1;
    } else if today.month() == 1 && parsed.month() == 12 {
        year -= 1;
    }

    NaiveDate::from_ymd_opt(year, parsed.month(), parsed.day())
}

/// What the scanner should do with one rendered day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayVerdict {
    /// Date label didn't parse; move to the next position.
    SkipUnparsed,
    /// Date is past the window end; stop the whole scan, later positions
    /// are never visited.
    Stop,
    /// Date is before the window start; tolerated leading out-of-range
    /// day, move on.
    SkipBeforeWindow,
    /// Weekday is excluded by the current filter; move on.
    SkipWeekday,
    /// Open this day and iterate its shifts.
    Check(NaiveDate),
}

/// Classify one day cell against the window and the live config snapshot.
///
/// The checks run in the same order the portal presents them: date range
/// first (so an out-of-window date stops or skips before the weekday
/// filter is consulted), then the weekday filter.
pub fn classify_day(
    date_label: &str,
    weekday_label: &str,
    window: &ScanWindow,
    config: &BotConfig,
    today: NaiveDate,
) -> DayVerdict {
    let date = match infer_date(date_label, today) {
        Some(date) => date,
        None => return DayVerdict::SkipUnparsed,
    };

    if date > window.end {
        return DayVerdict::Stop;
    }
    if date < window.start {
        return DayVerdict::SkipBeforeWindow;
    }
    if !config.allows_weekday(weekday_label) {
        return DayVerdict::SkipWeekday;
    }

    DayVerdict::Check(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn may_window() -> ScanWindow {
        ScanWindow {
            start: date(2025, 5, 1),
            end: date(2025, 5, 30),
        }
    }

    fn config_with_weekdays(days: &[&str]) -> BotConfig {
        let mut config = BotConfig::default();
        config.weekdays = days.iter().map(|d| d.to_string()).collect();
        config
    }

    #[test]
    fn test_window_spans_thirty_days() {
        let window = ScanWindow::next_30_days(date(2025, 5, 1));
        assert_eq!(window.start, date(2025, 5, 1));
        assert_eq!(window.end, date(2025, 5, 31));
    }

    #[test]
    fn test_infer_date_same_year() {
        assert_eq!(
            infer_date("Jun 2", date(2025, 5, 10)),
            Some(date(2025, 6, 2))
        );
    }

    #[test]
    fn test_infer_date_handles_newlines_in_label() {
        assert_eq!(
            infer_date("Jun\n2", date(2025, 5, 10)),
            Some(date(2025, 6, 2))
        );
    }

    #[test]
    fn test_infer_date_december_rollover() {
        assert_eq!(
            infer_date("Jan 5", date(2025, 12, 20)),
            Some(date(2026, 1, 5))
        );
    }

    #[test]
    fn test_infer_date_january_rollback() {
        assert_eq!(
            infer_date("Dec 30", date(2026, 1, 2)),
            Some(date(2025, 12, 30))
        );
    }

    #[test]
    fn test_infer_date_unparseable() {
        assert_eq!(infer_date("No shifts", date(2025, 5, 10)), None);
        assert_eq!(infer_date("", date(2025, 5, 10)), None);
    }

    #[test]
    fn test_infer_date_feb_29_off_leap_year() {
        // Parses against the leap dummy year but doesn't exist in 2025.
        assert_eq!(infer_date("Feb 29", date(2025, 2, 1)), None);
    }

    #[test]
    fn test_day_past_window_stops_scan() {
        let verdict = classify_day(
            "Jun 2",
            "Monday",
            &may_window(),
            &config_with_weekdays(&["Monday"]),
            date(2025, 5, 1),
        );
        assert_eq!(verdict, DayVerdict::Stop);
    }

    #[test]
    fn test_day_before_window_skips_and_continues() {
        let verdict = classify_day(
            "Apr 28",
            "Monday",
            &may_window(),
            &config_with_weekdays(&["Monday"]),
            date(2025, 5, 1),
        );
        assert_eq!(verdict, DayVerdict::SkipBeforeWindow);
    }

    #[test]
    fn test_excluded_weekday_skips() {
        let verdict = classify_day(
            "May 7",
            "Wednesday",
            &may_window(),
            &config_with_weekdays(&["Monday", "Sunday"]),
            date(2025, 5, 1),
        );
        assert_eq!(verdict, DayVerdict::SkipWeekday);
    }

    #[test]
    fn test_matching_day_is_checked() {
        let verdict = classify_day(
            "May 5",
            "Monday",
            &may_window(),
            &config_with_weekdays(&["Monday"]),
            date(2025, 5, 1),
        );
        assert_eq!(verdict, DayVerdict::Check(date(2025, 5, 5)));
    }

    #[test]
    fn test_date_range_wins_over_weekday_filter() {
        // An out-of-window date stops even when its weekday is excluded.
        let verdict = classify_day(
            "Jun 2",
            "Wednesday",
            &may_window(),
            &config_with_weekdays(&["Monday"]),
            date(2025, 5, 1),
        );
        assert_eq!(verdict, DayVerdict::Stop);
    }

    #[test]
    fn test_reloaded_config_changes_next_verdict() {
        // The scanner re-reads config at each day boundary; a new snapshot
        // flips the verdict for the next day, not the ones already done.
        let window = may_window();
        let today = date(2025, 5, 1);

        let before = config_with_weekdays(&["Monday"]);
        assert_eq!(
            classify_day("May 7", "Wednesday", &window, &before, today),
            DayVerdict::SkipWeekday
        );

        let after = config_with_weekdays(&["Monday", "Wednesday"]);
        assert_eq!(
            classify_day("May 7", "Wednesday", &window, &after, today),
            DayVerdict::Check(date(2025, 5, 7))
        );
    }
}
