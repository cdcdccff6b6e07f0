use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::BillFrequency;

use super::{shift_months, DateWindow};

/// Months scanned on either side of the period start when generating
/// candidates. Periods are at most about a month long, so this comfortably
/// covers cross-month windows and irregular short periods.
const SEARCH_RADIUS_MONTHS: i32 = 3;

/// Resolves a day-of-month in a concrete calendar month. A `due_day` beyond
/// the month's length rolls over into the following month (day 31 in
/// February resolves to early March), matching the documented rollover
/// policy for short months.
pub fn resolve_due_day(year: i32, month: u32, due_day: u32) -> NaiveDate {
    let month_start = NaiveDate::from_ymd_opt(year, month, 1)
        .expect("month index is always 1..=12 here");
    month_start + Duration::days(due_day as i64 - 1)
}

/// Returns every calendar date on which a bill with the given due day falls
/// inside the half-open window, in chronological order. Can be empty (short
/// period missing the due day) or contain several dates (window spanning
/// more than one month).
pub fn occurrences_in_window(due_day: u32, window: DateWindow) -> Vec<NaiveDate> {
    let anchor = window
        .start
        .with_day(1)
        .expect("day 1 is valid in every month");
    let mut occurrences = Vec::new();
    for offset in -SEARCH_RADIUS_MONTHS..=SEARCH_RADIUS_MONTHS {
        let month_start = shift_months(anchor, offset);
        let candidate = resolve_due_day(month_start.year(), month_start.month(), due_day);
        if window.contains(candidate) {
            occurrences.push(candidate);
        }
    }
    occurrences
}

/// First in-window occurrence, or the due day resolved in the period's start
/// month when the window never reaches it. Used when a payment record has to
/// be created on the fly for a bill that was never seeded into the period.
pub fn first_occurrence_or_fallback(due_day: u32, window: DateWindow) -> NaiveDate {
    occurrences_in_window(due_day, window)
        .into_iter()
        .next()
        .unwrap_or_else(|| resolve_due_day(window.start.year(), window.start.month(), due_day))
}

/// Next due date for a bill relative to `from`: the due day resolved in
/// `from`'s month, stepped once by the bill's cadence when already passed.
pub fn next_due_date(due_day: u32, frequency: BillFrequency, from: NaiveDate) -> NaiveDate {
    let candidate = resolve_due_day(from.year(), from.month(), due_day);
    if candidate > from {
        return candidate;
    }
    match frequency {
        BillFrequency::Weekly => candidate + Duration::weeks(1),
        BillFrequency::Biweekly => candidate + Duration::weeks(2),
        BillFrequency::Monthly => shift_months(candidate, 1),
        BillFrequency::Quarterly => shift_months(candidate, 3),
        BillFrequency::Annual => shift_months(candidate, 12),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(start: NaiveDate, end: NaiveDate) -> DateWindow {
        DateWindow::new(start, end).unwrap()
    }

    #[test]
    fn occurrences_stay_inside_the_window() {
        let w = window(date(2024, 1, 25), date(2024, 2, 10));
        for due_day in 1..=31 {
            for occurrence in occurrences_in_window(due_day, w) {
                assert!(w.contains(occurrence), "due_day {due_day} escaped: {occurrence}");
            }
        }
    }

    #[test]
    fn cross_month_window_finds_single_occurrences() {
        let w = window(date(2024, 1, 25), date(2024, 2, 10));
        assert_eq!(occurrences_in_window(5, w), vec![date(2024, 2, 5)]);
        assert_eq!(occurrences_in_window(28, w), vec![date(2024, 1, 28)]);
    }

    #[test]
    fn longer_windows_yield_one_occurrence_per_month() {
        let one_month = window(date(2024, 1, 1), date(2024, 2, 1));
        assert_eq!(occurrences_in_window(15, one_month), vec![date(2024, 1, 15)]);

        let two_months = window(date(2024, 1, 1), date(2024, 3, 1));
        assert_eq!(
            occurrences_in_window(15, two_months),
            vec![date(2024, 1, 15), date(2024, 2, 15)]
        );
    }

    #[test]
    fn short_window_can_miss_the_due_day() {
        let w = window(date(2024, 3, 2), date(2024, 3, 9));
        assert!(occurrences_in_window(15, w).is_empty());
    }

    #[test]
    fn due_day_31_rolls_into_the_next_month() {
        // February "31st" 2024 resolves to March 2nd (29 days + 2).
        assert_eq!(resolve_due_day(2024, 2, 31), date(2024, 3, 2));
        assert_eq!(resolve_due_day(2023, 2, 31), date(2023, 3, 3));

        let w = window(date(2024, 2, 25), date(2024, 3, 10));
        assert_eq!(occurrences_in_window(31, w), vec![date(2024, 3, 2)]);
    }

    #[test]
    fn fallback_uses_the_start_month() {
        let w = window(date(2024, 3, 2), date(2024, 3, 9));
        assert_eq!(first_occurrence_or_fallback(15, w), date(2024, 3, 15));
        assert_eq!(first_occurrence_or_fallback(5, w), date(2024, 3, 5));
    }

    #[test]
    fn next_due_date_steps_by_bill_cadence() {
        let from = date(2024, 1, 20);
        assert_eq!(next_due_date(25, BillFrequency::Monthly, from), date(2024, 1, 25));
        assert_eq!(next_due_date(10, BillFrequency::Monthly, from), date(2024, 2, 10));
        assert_eq!(next_due_date(10, BillFrequency::Weekly, from), date(2024, 1, 17));
        assert_eq!(next_due_date(10, BillFrequency::Quarterly, from), date(2024, 4, 10));
    }
}
