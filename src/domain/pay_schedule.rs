use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::period::{shift_months, DateWindow};

/// How often a user gets paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PayFrequency {
    Weekly,
    Biweekly,
    Semimonthly,
    Monthly,
}

impl PayFrequency {
    /// The payday following `current`.
    pub fn next_payday(self, current: NaiveDate) -> NaiveDate {
        match self {
            PayFrequency::Weekly => current + Duration::weeks(1),
            PayFrequency::Biweekly => current + Duration::weeks(2),
            PayFrequency::Semimonthly => current + Duration::days(15),
            PayFrequency::Monthly => shift_months(current, 1),
        }
    }

    /// The pay period that `next_payday` closes: the window's exclusive end
    /// is the payday itself, its start one pay cycle earlier.
    pub fn period_ending(self, next_payday: NaiveDate) -> DateWindow {
        let start = match self {
            PayFrequency::Weekly => next_payday - Duration::weeks(1),
            PayFrequency::Biweekly => next_payday - Duration::weeks(2),
            PayFrequency::Semimonthly => next_payday - Duration::days(15),
            PayFrequency::Monthly => shift_months(next_payday, -1),
        };
        DateWindow {
            start,
            end: next_payday,
        }
    }
}

/// The user's recurring pay cadence. One active schedule per user; updated
/// on rollover so future pre-fills stay in sync with the latest paycheck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaySchedule {
    pub id: Uuid,
    pub user_id: Uuid,
    pub frequency: PayFrequency,
    pub next_payday: NaiveDate,
    pub net_amount: Money,
}

impl PaySchedule {
    pub fn new(
        user_id: Uuid,
        frequency: PayFrequency,
        next_payday: NaiveDate,
        net_amount: Money,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            frequency,
            next_payday,
            net_amount,
        }
    }

    /// Days from `today` until the next payday (negative when overdue).
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.next_payday - today).num_days()
    }
}
