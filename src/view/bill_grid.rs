use std::collections::BTreeMap;

use chrono::{Datelike, Duration};

use crate::domain::{Bill, BillPayment};
use crate::period::DateWindow;

/// A bill merged with its optional payment for the displayed pay period.
/// Always present in the grid; the payment is absent when no occurrence was
/// generated for this paycheck.
#[derive(Debug, Clone)]
pub struct BillGridItem {
    pub bill: Bill,
    pub payment: Option<BillPayment>,
    pub in_current_period: bool,
}

/// Groups every bill by due day, merged with the displayed paycheck's
/// payments. Period membership is a day-of-month containment test between
/// the window's first and last covered days (the end is exclusive); when
/// the window crosses a month boundary (start day greater than end day)
/// the test wraps: `day >= start || day <= end`.
pub fn build_bill_grid(
    bills: &[Bill],
    payments: &[BillPayment],
    window: DateWindow,
) -> BTreeMap<u32, Vec<BillGridItem>> {
    let start_day = window.start.day();
    let end_day = (window.end - Duration::days(1)).day();
    let wraps = start_day > end_day;

    let mut grid: BTreeMap<u32, Vec<BillGridItem>> = BTreeMap::new();
    for bill in bills {
        let payment = payments.iter().find(|p| p.bill_id == bill.id).cloned();
        let day = bill.due_day;
        let in_current_period = if wraps {
            day >= start_day || day <= end_day
        } else {
            (start_day..=end_day).contains(&day)
        };
        grid.entry(day).or_default().push(BillGridItem {
            bill: bill.clone(),
            payment,
            in_current_period,
        });
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BillFrequency;
    use crate::money::Money;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
        .unwrap()
    }

    fn bill(user: Uuid, name: &str, due_day: u32) -> Bill {
        Bill::new(user, name, Money::from_major(40), due_day, BillFrequency::Monthly)
    }

    #[test]
    fn wrapping_window_uses_or_containment() {
        let user = Uuid::new_v4();
        let bills = [bill(user, "Rent", 28), bill(user, "Gym", 5), bill(user, "Water", 17)];
        // Jan 25 .. Feb 10 covers through Feb 9: start day 25 > 9, so the
        // test wraps.
        let grid = build_bill_grid(&bills, &[], window((2024, 1, 25), (2024, 2, 10)));

        assert!(grid[&28][0].in_current_period);
        assert!(grid[&5][0].in_current_period);
        assert!(!grid[&17][0].in_current_period);
    }

    #[test]
    fn full_month_window_covers_every_due_day() {
        let user = Uuid::new_v4();
        let bills = [bill(user, "Rent", 1), bill(user, "Gym", 15), bill(user, "Water", 31)];
        // Mar 1 .. Apr 1 exclusive covers Mar 1 through Mar 31.
        let grid = build_bill_grid(&bills, &[], window((2024, 3, 1), (2024, 4, 1)));

        assert!(grid[&1][0].in_current_period);
        assert!(grid[&15][0].in_current_period);
        assert!(grid[&31][0].in_current_period);
    }

    #[test]
    fn plain_window_uses_range_containment() {
        let user = Uuid::new_v4();
        let bills = [bill(user, "Rent", 1), bill(user, "Gym", 15), bill(user, "Water", 28)];
        let grid = build_bill_grid(&bills, &[], window((2024, 3, 5), (2024, 3, 19)));

        assert!(!grid[&1][0].in_current_period);
        assert!(grid[&15][0].in_current_period);
        assert!(!grid[&28][0].in_current_period);
    }

    #[test]
    fn payments_attach_to_their_bill() {
        let user = Uuid::new_v4();
        let paycheck = Uuid::new_v4();
        let rent = bill(user, "Rent", 1);
        let gym = bill(user, "Gym", 15);
        let payment = BillPayment::new(
            paycheck,
            rent.id,
            rent.amount,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );

        let grid = build_bill_grid(
            &[rent.clone(), gym],
            &[payment.clone()],
            window((2024, 3, 1), (2024, 4, 1)),
        );
        assert_eq!(
            grid[&1][0].payment.as_ref().map(|p| p.id),
            Some(payment.id)
        );
        assert!(grid[&15][0].payment.is_none());
    }

    #[test]
    fn bills_sharing_a_due_day_group_together() {
        let user = Uuid::new_v4();
        let bills = [bill(user, "Netflix", 12), bill(user, "Spotify", 12)];
        let grid = build_bill_grid(&bills, &[], window((2024, 3, 1), (2024, 4, 1)));
        assert_eq!(grid[&12].len(), 2);
    }
}
