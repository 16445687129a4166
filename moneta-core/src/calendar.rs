//! Calendar arithmetic used by the statement-cycle calculations.
//!
//! Month addition follows calendar semantics: the day-of-month is kept when
//! the target month has it and clamped to the target month's last day
//! otherwise (Jan 31 + 1 month = Feb 28, or Feb 29 in a leap year). Day
//! addition is plain arithmetic with no clamping. Everything saturates at the
//! edges of chrono's representable range instead of panicking.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

const SECONDS_PER_DAY: i64 = 86_400;

/// Number of days in `month` (1..=12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// Build `year-month-day`, clamping `day` into the valid range of that month.
///
/// Day 0 is treated as day 1; days past the month's end land on its last day.
pub fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    let month = month.clamp(1, 12);
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MAX)
}

/// Add calendar months with end-of-month clamping.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Add (or subtract, for negative `days`) whole days.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    match date.checked_add_signed(Duration::days(days)) {
        Some(d) => d,
        None if days < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Whole days from `from` to `to`, rounded toward negative infinity.
///
/// A due date at midnight seen from a mid-afternoon transaction therefore
/// loses the partial day: 14:00 on the 1st to 00:00 on the 3rd is 1 day.
pub fn floor_days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_seconds().div_euclid(SECONDS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn test_clamped_date() {
        assert_eq!(clamped_date(2025, 2, 31), d(2025, 2, 28));
        assert_eq!(clamped_date(2024, 2, 30), d(2024, 2, 29));
        assert_eq!(clamped_date(2025, 4, 31), d(2025, 4, 30));
        assert_eq!(clamped_date(2025, 5, 0), d(2025, 5, 1));
        assert_eq!(clamped_date(2025, 5, 15), d(2025, 5, 15));
    }

    #[test]
    fn test_add_months_clamps_end_of_month() {
        assert_eq!(add_months(d(2025, 1, 31), 1), d(2025, 2, 28));
        assert_eq!(add_months(d(2024, 1, 31), 1), d(2024, 2, 29));
        assert_eq!(add_months(d(2025, 3, 31), 1), d(2025, 4, 30));
        assert_eq!(add_months(d(2025, 8, 31), 1), d(2025, 9, 30));
    }

    #[test]
    fn test_add_months_year_rollover() {
        assert_eq!(add_months(d(2025, 12, 20), 1), d(2026, 1, 20));
        assert_eq!(add_months(d(2025, 12, 31), 2), d(2026, 2, 28));
    }

    #[test]
    fn test_add_days_crosses_months() {
        assert_eq!(add_days(d(2025, 1, 20), 15), d(2025, 2, 4));
        assert_eq!(add_days(d(2024, 2, 20), 10), d(2024, 3, 1));
        assert_eq!(add_days(d(2025, 3, 1), -1), d(2025, 2, 28));
        assert_eq!(add_days(d(2025, 3, 1), 0), d(2025, 3, 1));
    }

    #[test]
    fn test_add_days_saturates() {
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(add_days(NaiveDate::MIN, -1), NaiveDate::MIN);
    }

    #[test]
    fn test_floor_days_between() {
        let from = d(2025, 1, 1).and_hms_opt(14, 0, 0).unwrap();
        assert_eq!(floor_days_between(from, start_of_day(d(2025, 1, 3))), 1);
        assert_eq!(floor_days_between(start_of_day(d(2025, 1, 1)), start_of_day(d(2025, 1, 3))), 2);
        // Negative spans floor away from zero.
        assert_eq!(floor_days_between(from, start_of_day(d(2025, 1, 1))), -1);
        assert_eq!(floor_days_between(from, from), 0);
    }
}
