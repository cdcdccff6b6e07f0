use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{BillPayment, CategorySpending, Paycheck};
use crate::errors::BudgetError;
use crate::money::Money;
use crate::period::{recurrence, DateWindow};
use crate::store::BudgetStore;

use super::{RequestContext, ServiceResult};

/// The window and income of a paycheck about to be created by rollover.
#[derive(Debug, Clone, Copy)]
pub struct NewPeriod {
    pub pay_date: NaiveDate,
    pub period_start_date: NaiveDate,
    pub period_end_date: NaiveDate,
    pub net_amount: Money,
}

/// A paycheck's derived summary fields after reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregates {
    pub reserved_bills: Money,
    pub reserved_savings: Money,
    pub spendable: Money,
}

pub struct PeriodService;

impl PeriodService {
    /// Seeds a freshly created paycheck: one envelope per category, one
    /// bill payment per in-window occurrence of every active bill, then the
    /// first aggregate fold. Errors if the paycheck already has child rows;
    /// initialization must run at most once per paycheck.
    pub fn initialize(store: &mut BudgetStore, paycheck_id: Uuid) -> ServiceResult<Aggregates> {
        let paycheck = store
            .paycheck(paycheck_id)
            .ok_or_else(|| BudgetError::NotFound(format!("paycheck {paycheck_id}")))?;
        let user_id = paycheck.user_id;
        let window = paycheck.window();

        if !store.spending_for_paycheck(paycheck_id).is_empty()
            || !store.payments_for_paycheck(paycheck_id).is_empty()
        {
            return Err(BudgetError::AlreadyInitialized(paycheck_id));
        }

        let envelopes: Vec<CategorySpending> = store
            .categories_for_user(user_id)
            .iter()
            .map(|cat| CategorySpending::new(paycheck_id, cat.id, cat.amount_per_paycheck))
            .collect();
        let payments: Vec<BillPayment> = store
            .active_bills_for_user(user_id)
            .iter()
            .flat_map(|bill| {
                recurrence::occurrences_in_window(bill.due_day, window)
                    .into_iter()
                    .map(|due_date| BillPayment::new(paycheck_id, bill.id, bill.amount, due_date))
                    .collect::<Vec<_>>()
            })
            .collect();

        info!(
            %paycheck_id,
            envelopes = envelopes.len(),
            bill_occurrences = payments.len(),
            "initializing pay period"
        );

        for envelope in envelopes {
            store.insert_spending(envelope);
        }
        for payment in payments {
            store.insert_payment(payment);
        }

        Self::recompute_aggregates(store, paycheck_id)
    }

    /// Reconciles a paycheck's summary fields as a pure fold over its child
    /// rows. Unconditional and idempotent; never an incremental delta, so a
    /// re-run after a partial failure self-heals the aggregates.
    pub fn recompute_aggregates(
        store: &mut BudgetStore,
        paycheck_id: Uuid,
    ) -> ServiceResult<Aggregates> {
        let reserved_bills: Money = store
            .payments_for_paycheck(paycheck_id)
            .iter()
            .map(|p| p.reserved_contribution())
            .sum();
        // Historical name: covers the planned allocation of every category,
        // not just savings-typed ones, so spendable reflects all commitments.
        let reserved_savings: Money = store
            .spending_for_paycheck(paycheck_id)
            .iter()
            .map(|s| s.planned)
            .sum();

        let paycheck = store
            .paycheck_mut(paycheck_id)
            .ok_or_else(|| BudgetError::NotFound(format!("paycheck {paycheck_id}")))?;
        let spendable = paycheck.net_amount - reserved_bills - reserved_savings;
        paycheck.reserved_bills = reserved_bills;
        paycheck.reserved_savings = reserved_savings;
        paycheck.spendable = spendable;
        paycheck.touch();
        store.touch();

        debug!(
            %paycheck_id,
            reserved_bills = %reserved_bills,
            reserved_savings = %reserved_savings,
            spendable = %spendable,
            "recomputed paycheck aggregates"
        );

        Ok(Aggregates {
            reserved_bills,
            reserved_savings,
            spendable,
        })
    }

    /// Retires the user's current paycheck and creates + initializes the
    /// next one. The retired period's envelopes and payments are left
    /// untouched as read-only history. Also re-syncs the pay schedule so
    /// future pre-fills reflect the latest payday and income.
    pub fn rollover(
        store: &mut BudgetStore,
        ctx: &RequestContext,
        new_period: NewPeriod,
    ) -> ServiceResult<Paycheck> {
        if !new_period.net_amount.is_positive() {
            return Err(BudgetError::InvalidInput(
                "net amount must be positive".into(),
            ));
        }
        let window = DateWindow::new(new_period.period_start_date, new_period.period_end_date)?;

        for paycheck in store
            .paychecks
            .iter_mut()
            .filter(|p| p.user_id == ctx.user_id && p.is_current)
        {
            paycheck.is_current = false;
            paycheck.touch();
        }

        let paycheck = Paycheck::new(
            ctx.user_id,
            new_period.pay_date,
            window,
            new_period.net_amount,
        );
        let paycheck_id = store.insert_paycheck(paycheck);
        info!(user_id = %ctx.user_id, %paycheck_id, "rolled over to new pay period");

        Self::initialize(store, paycheck_id)?;

        if let Some(schedule) = store.pay_schedule_for_user_mut(ctx.user_id) {
            schedule.net_amount = new_period.net_amount;
            schedule.next_payday = new_period.pay_date;
        }
        store.touch();

        store
            .paycheck(paycheck_id)
            .cloned()
            .ok_or_else(|| BudgetError::NotFound(format!("paycheck {paycheck_id}")))
    }

    /// Edits the current paycheck's income and pay date, then reconciles.
    /// The recompute is the same fold as everywhere else; spendable is never
    /// patched by the net-amount delta. Rejects superseded paychecks, which
    /// would otherwise leak stale figures into the pay schedule below.
    pub fn update_net_amount(
        store: &mut BudgetStore,
        ctx: &RequestContext,
        paycheck_id: Uuid,
        net_amount: Money,
        pay_date: Option<NaiveDate>,
    ) -> ServiceResult<Aggregates> {
        if !net_amount.is_positive() {
            return Err(BudgetError::InvalidInput(
                "net amount must be positive".into(),
            ));
        }
        super::ensure_current(store, paycheck_id)?;
        {
            let paycheck = store
                .paycheck_mut(paycheck_id)
                .ok_or_else(|| BudgetError::NotFound(format!("paycheck {paycheck_id}")))?;
            paycheck.net_amount = net_amount;
            if let Some(pay_date) = pay_date {
                paycheck.pay_date = pay_date;
            }
            paycheck.touch();
        }
        let aggregates = Self::recompute_aggregates(store, paycheck_id)?;

        if let Some(schedule) = store.pay_schedule_for_user_mut(ctx.user_id) {
            schedule.net_amount = net_amount;
            if let Some(pay_date) = pay_date {
                schedule.next_payday = pay_date;
            }
            store.touch();
        }
        Ok(aggregates)
    }
}
