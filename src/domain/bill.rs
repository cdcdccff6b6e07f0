use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// Nominal cadence of a recurring bill. Occurrence generation inside a pay
/// period is driven by `due_day` alone; the frequency additionally feeds the
/// next-due-date helper used for upcoming-bill displays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillFrequency {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Annual,
}

/// A recurring bill template. Edits propagate only to unpaid payments of the
/// current period; paid payments and past periods are history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub amount: Money,
    /// Day of month the bill falls due, 1 through 31.
    pub due_day: u32,
    pub frequency: BillFrequency,
    pub category_id: Option<Uuid>,
    pub is_active: bool,
}

impl Bill {
    pub fn new(
        user_id: Uuid,
        name: impl Into<String>,
        amount: Money,
        due_day: u32,
        frequency: BillFrequency,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            amount,
            due_day,
            frequency,
            category_id: None,
            is_active: true,
        }
    }
}

/// One concrete occurrence of a bill inside one pay period. A (bill,
/// paycheck) pair may own zero, one, or several of these when the due day
/// recurs more than once in the window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillPayment {
    pub id: Uuid,
    pub paycheck_id: Uuid,
    pub bill_id: Uuid,
    pub planned_amount: Money,
    pub actual_amount: Option<Money>,
    pub due_date: NaiveDate,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
}

impl BillPayment {
    pub fn new(paycheck_id: Uuid, bill_id: Uuid, planned_amount: Money, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            paycheck_id,
            bill_id,
            planned_amount,
            actual_amount: None,
            due_date,
            is_paid: false,
            paid_at: None,
        }
    }

    /// Amount this payment contributes to `reserved_bills`: the confirmed
    /// actual once paid, the plan otherwise.
    pub fn reserved_contribution(&self) -> Money {
        if self.is_paid {
            self.actual_amount.unwrap_or(self.planned_amount)
        } else {
            self.planned_amount
        }
    }

    pub fn mark_paid(&mut self, actual_amount: Money) {
        self.is_paid = true;
        self.actual_amount = Some(actual_amount);
        self.paid_at = Some(Utc::now());
    }

    pub fn undo_paid(&mut self) {
        self.is_paid = false;
        self.actual_amount = None;
        self.paid_at = None;
    }
}
