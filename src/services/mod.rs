//! Storage-orchestrating operations: period initialization and rollover,
//! aggregate reconciliation, and the bill/category/spending mutations that
//! trigger it.

pub mod bill_service;
pub mod category_service;
pub mod period_service;
pub mod spending_service;

pub use bill_service::{BillChanges, BillService, NewBill};
pub use category_service::{CategoryService, NewCategory};
pub use period_service::{Aggregates, NewPeriod, PeriodService};
pub use spending_service::SpendingService;

use uuid::Uuid;

use crate::errors::BudgetError;
use crate::store::BudgetStore;

pub type ServiceResult<T> = Result<T, BudgetError>;

/// Superseded paychecks are read-only history. Every mutation entry point
/// that can address an arbitrary paycheck checks here first.
pub(crate) fn ensure_current(store: &BudgetStore, paycheck_id: Uuid) -> ServiceResult<()> {
    let paycheck = store
        .paycheck(paycheck_id)
        .ok_or_else(|| BudgetError::NotFound(format!("paycheck {paycheck_id}")))?;
    if !paycheck.is_current {
        return Err(BudgetError::InvalidInput(format!(
            "paycheck {paycheck_id} is superseded and read-only"
        )));
    }
    Ok(())
}

/// Request-scoped caller identity. Passed explicitly into every operation
/// that scopes by user; the core holds no process-wide session state.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    pub user_id: Uuid,
}

impl RequestContext {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
