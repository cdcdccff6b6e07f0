use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Category, CategoryKind, CategorySpending, Transaction};
use crate::money::Money;

/// How many recent transactions each envelope carries for display.
const RECENT_TRANSACTION_LIMIT: usize = 8;

/// Health classification of an envelope by its spent/planned ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    /// Below 80% of plan.
    Healthy,
    /// At 80% up to and including 100% of plan.
    NearLimit,
    /// Strictly over plan.
    OverBudget,
}

impl EnvelopeState {
    /// Integer-cent classification; an envelope with no plan is healthy.
    pub fn classify(spent: Money, planned: Money) -> EnvelopeState {
        if !planned.is_positive() {
            return EnvelopeState::Healthy;
        }
        if spent > planned {
            return EnvelopeState::OverBudget;
        }
        if spent.cents() * 5 >= planned.cents() * 4 {
            EnvelopeState::NearLimit
        } else {
            EnvelopeState::Healthy
        }
    }
}

/// One spending event attached to an envelope for display.
#[derive(Debug, Clone)]
pub struct EnvelopeTransaction {
    pub id: Uuid,
    pub amount: Money,
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// Display-ready state of one category envelope in one pay period:
/// the explicit join of a spending row with its category template and its
/// most recent transactions.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub spending_id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub kind: CategoryKind,
    pub planned: Money,
    pub spent: Money,
    pub remaining: Money,
    pub state: EnvelopeState,
    /// Newest first, capped at [`RECENT_TRANSACTION_LIMIT`].
    pub transactions: Vec<EnvelopeTransaction>,
}

impl Envelope {
    /// Spent share of the plan in whole percent, capped at 100.
    pub fn progress_percent(&self) -> u32 {
        if !self.planned.is_positive() {
            return 0;
        }
        let pct = self.spent.cents().max(0) * 100 / self.planned.cents();
        pct.min(100) as u32
    }
}

/// Joins each envelope row to its category and recent transactions,
/// ordered by category display priority. Spending rows whose category
/// template no longer exists are skipped.
pub fn build_envelopes(
    categories: &[Category],
    spending: &[CategorySpending],
    transactions: &[Transaction],
) -> Vec<Envelope> {
    let mut envelopes: Vec<(u32, Envelope)> = spending
        .iter()
        .filter_map(|row| {
            let category = categories.iter().find(|c| c.id == row.category_id)?;
            let mut recent: Vec<&Transaction> = transactions
                .iter()
                .filter(|t| t.category_id == Some(category.id))
                .collect();
            recent.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
            let recent = recent
                .into_iter()
                .take(RECENT_TRANSACTION_LIMIT)
                .map(|t| EnvelopeTransaction {
                    id: t.id,
                    amount: t.amount,
                    description: t.description.clone(),
                    date: t.transaction_date,
                })
                .collect();

            Some((
                category.priority,
                Envelope {
                    spending_id: row.id,
                    category_id: category.id,
                    name: category.name.clone(),
                    kind: category.kind,
                    planned: row.planned,
                    spent: row.spent,
                    remaining: row.remaining(),
                    state: EnvelopeState::classify(row.spent, row.planned),
                    transactions: recent,
                },
            ))
        })
        .collect();
    envelopes.sort_by_key(|(priority, _)| *priority);
    envelopes.into_iter().map(|(_, envelope)| envelope).collect()
}
