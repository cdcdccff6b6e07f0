use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Transaction;
use crate::errors::BudgetError;
use crate::money::Money;
use crate::store::BudgetStore;

use super::{PeriodService, RequestContext, ServiceResult};

pub struct SpendingService;

impl SpendingService {
    /// Logs an ad-hoc spending event: appends a transaction and increments
    /// the matching envelope's `spent` by the same amount. Both references
    /// are validated up front so the pair lands as one logical operation and
    /// the envelope never disagrees with the transaction log.
    pub fn log_spending(
        store: &mut BudgetStore,
        ctx: &RequestContext,
        paycheck_id: Uuid,
        category_id: Uuid,
        amount: Money,
        description: Option<String>,
        transaction_date: NaiveDate,
    ) -> ServiceResult<Transaction> {
        if !amount.is_positive() {
            return Err(BudgetError::InvalidInput("amount must be positive".into()));
        }
        super::ensure_current(store, paycheck_id)?;
        if store.spending_entry(paycheck_id, category_id).is_none() {
            return Err(BudgetError::NotFound(format!(
                "envelope for category {category_id}"
            )));
        }

        let transaction = Transaction::new(
            ctx.user_id,
            paycheck_id,
            Some(category_id),
            amount,
            description,
            transaction_date,
        );
        let created = transaction.clone();
        store.insert_transaction(transaction);
        if let Some(envelope) = store.spending_entry_mut(paycheck_id, category_id) {
            envelope.spent += amount;
        }
        debug!(%paycheck_id, %category_id, amount = %amount, "logged spending");

        // Spending moves `spent`, not `planned`, so the aggregates are
        // unchanged; the fold keeps the invariant enforced all the same.
        PeriodService::recompute_aggregates(store, paycheck_id)?;
        Ok(created)
    }
}
