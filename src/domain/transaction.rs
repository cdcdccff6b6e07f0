use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// An append-only ad-hoc spending event against a category envelope. Every
/// insertion is paired with a `spent` increment on the matching
/// [`CategorySpending`](super::CategorySpending) row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub paycheck_id: Uuid,
    pub category_id: Option<Uuid>,
    pub amount: Money,
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
}

impl Transaction {
    pub fn new(
        user_id: Uuid,
        paycheck_id: Uuid,
        category_id: Option<Uuid>,
        amount: Money,
        description: Option<String>,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            paycheck_id,
            category_id,
            amount,
            description,
            transaction_date,
        }
    }
}
