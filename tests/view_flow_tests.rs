use chrono::NaiveDate;
use paycheck_core::domain::{Bill, BillFrequency, Category, CategoryKind};
use paycheck_core::money::Money;
use paycheck_core::services::{NewPeriod, PeriodService, RequestContext, SpendingService};
use paycheck_core::store::BudgetStore;
use paycheck_core::view::{build_bill_grid, build_envelopes, EnvelopeState};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn envelopes_reflect_the_period_after_spending() {
    let mut store = BudgetStore::new();
    let ctx = RequestContext::new(Uuid::new_v4());
    let groceries = store.insert_category(Category::new(
        ctx.user_id,
        "Groceries",
        CategoryKind::Flexible,
        Money::from_major(100),
        2,
    ));
    store.insert_category(Category::new(
        ctx.user_id,
        "Savings",
        CategoryKind::Savings,
        Money::from_major(200),
        1,
    ));
    let paycheck = PeriodService::rollover(
        &mut store,
        &ctx,
        NewPeriod {
            pay_date: date(2024, 3, 1),
            period_start_date: date(2024, 3, 1),
            period_end_date: date(2024, 4, 1),
            net_amount: Money::from_major(1000),
        },
    )
    .unwrap();
    SpendingService::log_spending(
        &mut store,
        &ctx,
        paycheck.id,
        groceries,
        Money::from_major(85),
        Some("Weekly shop".into()),
        date(2024, 3, 4),
    )
    .unwrap();

    let categories: Vec<Category> = store
        .categories_for_user(ctx.user_id)
        .into_iter()
        .cloned()
        .collect();
    let spending: Vec<_> = store
        .spending_for_paycheck(paycheck.id)
        .into_iter()
        .cloned()
        .collect();
    let transactions: Vec<_> = store
        .transactions_for_paycheck(paycheck.id)
        .into_iter()
        .cloned()
        .collect();
    let envelopes = build_envelopes(&categories, &spending, &transactions);

    assert_eq!(envelopes.len(), 2);
    // Display order follows category priority, not insertion order.
    assert_eq!(envelopes[0].name, "Savings");
    assert_eq!(envelopes[1].name, "Groceries");

    let groceries_env = &envelopes[1];
    assert_eq!(groceries_env.spent, Money::from_major(85));
    assert_eq!(groceries_env.remaining, Money::from_major(15));
    assert_eq!(groceries_env.state, EnvelopeState::NearLimit);
    assert_eq!(groceries_env.progress_percent(), 85);
    assert_eq!(groceries_env.transactions.len(), 1);
    assert_eq!(
        groceries_env.transactions[0].description.as_deref(),
        Some("Weekly shop")
    );
    assert_eq!(envelopes[0].state, EnvelopeState::Healthy);
}

#[test]
fn bill_grid_merges_the_period_payments() {
    let mut store = BudgetStore::new();
    let ctx = RequestContext::new(Uuid::new_v4());
    store.insert_bill(Bill::new(
        ctx.user_id,
        "Rent",
        Money::from_major(900),
        1,
        BillFrequency::Monthly,
    ));
    store.insert_bill(Bill::new(
        ctx.user_id,
        "Gym",
        Money::from_major(30),
        20,
        BillFrequency::Monthly,
    ));
    let paycheck = PeriodService::rollover(
        &mut store,
        &ctx,
        NewPeriod {
            pay_date: date(2024, 3, 1),
            period_start_date: date(2024, 3, 1),
            period_end_date: date(2024, 3, 15),
            net_amount: Money::from_major(1500),
        },
    )
    .unwrap();

    let bills: Vec<Bill> = store
        .bills_for_user(ctx.user_id)
        .into_iter()
        .cloned()
        .collect();
    let payments: Vec<_> = store
        .payments_for_paycheck(paycheck.id)
        .into_iter()
        .cloned()
        .collect();
    let grid = build_bill_grid(&bills, &payments, paycheck.window());

    // Rent's due day sits in the Mar 1..15 window and got an occurrence.
    let rent = &grid[&1][0];
    assert!(rent.in_current_period);
    assert!(rent.payment.is_some());
    // Gym's day 20 is outside; still listed, with no payment attached.
    let gym = &grid[&20][0];
    assert!(!gym.in_current_period);
    assert!(gym.payment.is_none());
}
