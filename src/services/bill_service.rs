use tracing::info;
use uuid::Uuid;

use crate::domain::{Bill, BillFrequency, BillPayment};
use crate::errors::BudgetError;
use crate::money::Money;
use crate::period::recurrence;
use crate::store::BudgetStore;

use super::{PeriodService, RequestContext, ServiceResult};

/// Input for a new bill template.
#[derive(Debug, Clone)]
pub struct NewBill {
    pub name: String,
    pub amount: Money,
    pub due_day: u32,
    pub frequency: BillFrequency,
    pub category_id: Option<Uuid>,
}

/// Replacement values for an existing bill template.
#[derive(Debug, Clone)]
pub struct BillChanges {
    pub name: String,
    pub amount: Money,
    pub due_day: u32,
    pub frequency: BillFrequency,
}

pub struct BillService;

impl BillService {
    /// Inserts the template and, when a current paycheck exists, seeds one
    /// payment per occurrence of the due day inside its window, then
    /// reconciles.
    pub fn create(
        store: &mut BudgetStore,
        ctx: &RequestContext,
        new_bill: NewBill,
    ) -> ServiceResult<Bill> {
        validate_bill_fields(&new_bill.name, new_bill.amount, new_bill.due_day)?;

        let mut bill = Bill::new(
            ctx.user_id,
            new_bill.name,
            new_bill.amount,
            new_bill.due_day,
            new_bill.frequency,
        );
        bill.category_id = new_bill.category_id;
        let created = bill.clone();
        store.insert_bill(bill);
        info!(bill_id = %created.id, name = %created.name, "created bill");

        if let Some(current) = store.current_paycheck(ctx.user_id) {
            let paycheck_id = current.id;
            let window = current.window();
            for due_date in recurrence::occurrences_in_window(created.due_day, window) {
                store.insert_payment(BillPayment::new(
                    paycheck_id,
                    created.id,
                    created.amount,
                    due_date,
                ));
            }
            PeriodService::recompute_aggregates(store, paycheck_id)?;
        }
        Ok(created)
    }

    /// Updates the template and propagates the new amount to the current
    /// paycheck's unpaid payments only. Paid payments and past periods are
    /// historical and untouched.
    pub fn edit(
        store: &mut BudgetStore,
        ctx: &RequestContext,
        bill_id: Uuid,
        changes: BillChanges,
    ) -> ServiceResult<()> {
        validate_bill_fields(&changes.name, changes.amount, changes.due_day)?;

        let bill = store
            .bill_mut(bill_id)
            .ok_or_else(|| BudgetError::NotFound(format!("bill {bill_id}")))?;
        bill.name = changes.name;
        bill.amount = changes.amount;
        bill.due_day = changes.due_day;
        bill.frequency = changes.frequency;

        if let Some(current) = store.current_paycheck(ctx.user_id) {
            let paycheck_id = current.id;
            for payment in store
                .bill_payments
                .iter_mut()
                .filter(|p| p.paycheck_id == paycheck_id && p.bill_id == bill_id && !p.is_paid)
            {
                payment.planned_amount = changes.amount;
            }
            PeriodService::recompute_aggregates(store, paycheck_id)?;
        } else {
            store.touch();
        }
        Ok(())
    }

    /// Deletes the template along with the current paycheck's payment links
    /// for it. Payments in superseded paychecks stay behind as history.
    pub fn delete(store: &mut BudgetStore, ctx: &RequestContext, bill_id: Uuid) -> ServiceResult<()> {
        if !store.remove_bill(bill_id) {
            return Err(BudgetError::NotFound(format!("bill {bill_id}")));
        }
        info!(%bill_id, "deleted bill");
        if let Some(current) = store.current_paycheck(ctx.user_id) {
            let paycheck_id = current.id;
            store.remove_payments_for_bill_in(paycheck_id, bill_id);
            PeriodService::recompute_aggregates(store, paycheck_id)?;
        }
        Ok(())
    }

    /// Marks an existing payment record paid with the confirmed amount.
    /// Once paid, the actual amount wins over the plan in every recompute.
    /// Payments of superseded paychecks are read-only.
    pub fn mark_paid(
        store: &mut BudgetStore,
        payment_id: Uuid,
        actual_amount: Money,
    ) -> ServiceResult<()> {
        if !actual_amount.is_positive() {
            return Err(BudgetError::InvalidInput("amount must be positive".into()));
        }
        let paycheck_id = store
            .payment(payment_id)
            .map(|p| p.paycheck_id)
            .ok_or_else(|| BudgetError::NotFound(format!("bill payment {payment_id}")))?;
        super::ensure_current(store, paycheck_id)?;
        if let Some(payment) = store.payment_mut(payment_id) {
            payment.mark_paid(actual_amount);
        }
        PeriodService::recompute_aggregates(store, paycheck_id)?;
        Ok(())
    }

    /// Marks a bill paid when no payment record exists yet (the bill was
    /// added after period init, or its occurrence was never generated). The
    /// record is created on the fly with a due date from the recurrence
    /// engine, falling back to the due day in the period's start month.
    pub fn mark_paid_without_record(
        store: &mut BudgetStore,
        paycheck_id: Uuid,
        bill_id: Uuid,
        actual_amount: Money,
        planned_amount: Option<Money>,
    ) -> ServiceResult<BillPayment> {
        if !actual_amount.is_positive() {
            return Err(BudgetError::InvalidInput("amount must be positive".into()));
        }
        super::ensure_current(store, paycheck_id)?;
        let paycheck = store
            .paycheck(paycheck_id)
            .ok_or_else(|| BudgetError::NotFound(format!("paycheck {paycheck_id}")))?;
        let window = paycheck.window();
        let bill = store
            .bill(bill_id)
            .ok_or_else(|| BudgetError::NotFound(format!("bill {bill_id}")))?;

        let due_date = recurrence::first_occurrence_or_fallback(bill.due_day, window);
        let mut payment = BillPayment::new(
            paycheck_id,
            bill_id,
            planned_amount.unwrap_or(actual_amount),
            due_date,
        );
        payment.mark_paid(actual_amount);
        let created = payment.clone();
        store.insert_payment(payment);
        info!(%bill_id, %paycheck_id, "created payment record on the fly while marking paid");

        PeriodService::recompute_aggregates(store, paycheck_id)?;
        Ok(created)
    }

    /// Reverts a current-period payment to unpaid, dropping the confirmed
    /// amount.
    pub fn undo_paid(store: &mut BudgetStore, payment_id: Uuid) -> ServiceResult<()> {
        let paycheck_id = store
            .payment(payment_id)
            .map(|p| p.paycheck_id)
            .ok_or_else(|| BudgetError::NotFound(format!("bill payment {payment_id}")))?;
        super::ensure_current(store, paycheck_id)?;
        if let Some(payment) = store.payment_mut(payment_id) {
            payment.undo_paid();
        }
        PeriodService::recompute_aggregates(store, paycheck_id)?;
        Ok(())
    }

    /// Removes one current-period payment occurrence and reconciles its
    /// paycheck.
    pub fn delete_payment(store: &mut BudgetStore, payment_id: Uuid) -> ServiceResult<()> {
        let paycheck_id = store
            .payment(payment_id)
            .map(|p| p.paycheck_id)
            .ok_or_else(|| BudgetError::NotFound(format!("bill payment {payment_id}")))?;
        super::ensure_current(store, paycheck_id)?;
        store.remove_payment(payment_id);
        PeriodService::recompute_aggregates(store, paycheck_id)?;
        Ok(())
    }
}

fn validate_bill_fields(name: &str, amount: Money, due_day: u32) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(BudgetError::InvalidInput("bill name is required".into()));
    }
    if !amount.is_positive() {
        return Err(BudgetError::InvalidInput("amount must be positive".into()));
    }
    if !(1..=31).contains(&due_day) {
        return Err(BudgetError::InvalidInput(
            "due day must be between 1 and 31".into(),
        ));
    }
    Ok(())
}
