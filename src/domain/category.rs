use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// Supported spending-category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Fixed,
    Flexible,
    Savings,
}

/// A per-user budgeting template: how much to set aside for this category
/// each pay period. Persists across periods; each period gets its own
/// [`CategorySpending`] envelope instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub kind: CategoryKind,
    pub amount_per_paycheck: Money,
    pub priority: u32,
}

impl Category {
    pub fn new(
        user_id: Uuid,
        name: impl Into<String>,
        kind: CategoryKind,
        amount_per_paycheck: Money,
        priority: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            kind,
            amount_per_paycheck,
            priority,
        }
    }
}

/// The envelope instance for one category in one pay period. `remaining` is
/// always derived, never stored or independently mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpending {
    pub id: Uuid,
    pub paycheck_id: Uuid,
    pub category_id: Uuid,
    pub planned: Money,
    pub spent: Money,
}

impl CategorySpending {
    pub fn new(paycheck_id: Uuid, category_id: Uuid, planned: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            paycheck_id,
            category_id,
            planned,
            spent: Money::ZERO,
        }
    }

    pub fn remaining(&self) -> Money {
        self.planned - self.spent
    }
}
