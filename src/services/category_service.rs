use tracing::info;
use uuid::Uuid;

use crate::domain::{Category, CategoryKind, CategorySpending};
use crate::errors::BudgetError;
use crate::money::Money;
use crate::store::BudgetStore;

use super::{PeriodService, RequestContext, ServiceResult};

/// Input for a new category template. Priority defaults to the end of the
/// user's display order.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub kind: CategoryKind,
    pub amount_per_paycheck: Money,
    pub priority: Option<u32>,
}

pub struct CategoryService;

impl CategoryService {
    /// Inserts the template and, when a current paycheck exists, opens its
    /// envelope for this period, then reconciles.
    pub fn add(
        store: &mut BudgetStore,
        ctx: &RequestContext,
        new_category: NewCategory,
    ) -> ServiceResult<Category> {
        validate_category_fields(&new_category.name, new_category.amount_per_paycheck)?;

        let priority = new_category
            .priority
            .unwrap_or_else(|| store.categories_for_user(ctx.user_id).len() as u32 + 1);
        let category = Category::new(
            ctx.user_id,
            new_category.name,
            new_category.kind,
            new_category.amount_per_paycheck,
            priority,
        );
        let created = category.clone();
        store.insert_category(category);
        info!(category_id = %created.id, name = %created.name, "created category");

        if let Some(current) = store.current_paycheck(ctx.user_id) {
            let paycheck_id = current.id;
            store.insert_spending(CategorySpending::new(
                paycheck_id,
                created.id,
                created.amount_per_paycheck,
            ));
            PeriodService::recompute_aggregates(store, paycheck_id)?;
        }
        Ok(created)
    }

    /// Updates the template and mirrors the new allocation onto the current
    /// period's envelope. Past periods keep their envelopes as written.
    pub fn edit(
        store: &mut BudgetStore,
        ctx: &RequestContext,
        category_id: Uuid,
        name: String,
        kind: CategoryKind,
        amount_per_paycheck: Money,
    ) -> ServiceResult<()> {
        validate_category_fields(&name, amount_per_paycheck)?;

        let category = store
            .category_mut(category_id)
            .ok_or_else(|| BudgetError::NotFound(format!("category {category_id}")))?;
        category.name = name;
        category.kind = kind;
        category.amount_per_paycheck = amount_per_paycheck;

        if let Some(current) = store.current_paycheck(ctx.user_id) {
            let paycheck_id = current.id;
            if let Some(envelope) = store.spending_entry_mut(paycheck_id, category_id) {
                envelope.planned = amount_per_paycheck;
            }
            PeriodService::recompute_aggregates(store, paycheck_id)?;
        } else {
            store.touch();
        }
        Ok(())
    }

    /// Removes the category from the current period: its transactions and
    /// envelope for this paycheck are deleted, and the template itself is
    /// dropped only once no other period still references it. Reconciles
    /// afterwards.
    pub fn remove(
        store: &mut BudgetStore,
        ctx: &RequestContext,
        category_id: Uuid,
    ) -> ServiceResult<()> {
        if store.category(category_id).is_none() {
            return Err(BudgetError::NotFound(format!("category {category_id}")));
        }

        if let Some(current) = store.current_paycheck(ctx.user_id) {
            let paycheck_id = current.id;
            store.remove_transactions_for_category_in(paycheck_id, category_id);
            store.remove_spending_entry(paycheck_id, category_id);

            if store.spending_rows_for_category(category_id) == 0 {
                store.remove_category(category_id);
                info!(%category_id, "removed orphaned category template");
            }
            PeriodService::recompute_aggregates(store, paycheck_id)?;
        } else {
            store.remove_category(category_id);
        }
        Ok(())
    }
}

fn validate_category_fields(name: &str, amount: Money) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(BudgetError::InvalidInput("category name is required".into()));
    }
    if !amount.is_positive() {
        return Err(BudgetError::InvalidInput("amount must be positive".into()));
    }
    Ok(())
}
