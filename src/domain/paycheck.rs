use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::period::DateWindow;

/// One pay period's allocation of net income. Exactly one paycheck per user
/// may be current; superseded paychecks stay behind as read-only history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paycheck {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pay_date: NaiveDate,
    pub period_start_date: NaiveDate,
    pub period_end_date: NaiveDate,
    pub net_amount: Money,
    pub reserved_bills: Money,
    pub reserved_savings: Money,
    pub spendable: Money,
    pub is_current: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Paycheck {
    /// A fresh, current paycheck with untouched reserves: everything is
    /// spendable until the initializer seeds envelopes and bills.
    pub fn new(user_id: Uuid, pay_date: NaiveDate, window: DateWindow, net_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            pay_date,
            period_start_date: window.start,
            period_end_date: window.end,
            net_amount,
            reserved_bills: Money::ZERO,
            reserved_savings: Money::ZERO,
            spendable: net_amount,
            is_current: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn window(&self) -> DateWindow {
        DateWindow {
            start: self.period_start_date,
            end: self.period_end_date,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
