//! Persistent-store collaborator: the in-memory dataset with typed CRUD
//! accessors per entity, and the snapshot storage backends behind it.

pub mod json_backend;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Bill, BillPayment, Category, CategorySpending, PaySchedule, Paycheck, Transaction,
};
use crate::errors::Result;

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Abstraction over persistence backends capable of storing budget
/// snapshots and backups.
pub trait StorageBackend: Send + Sync {
    fn save(&self, store: &BudgetStore, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<BudgetStore>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    fn backup(&self, store: &BudgetStore, name: &str, note: Option<&str>) -> Result<()>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<BudgetStore>;

    /// Ad-hoc file operations; default implementations bypass managed
    /// storage and write straight to the given path.
    fn save_to_path(&self, store: &BudgetStore, path: &Path) -> Result<()> {
        json_backend::save_store_to_path(store, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<BudgetStore> {
        json_backend::load_store_from_path(path)
    }
}

/// All budgeting rows for every user, with typed accessors standing in for
/// the per-entity CRUD surface of the real persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetStore {
    #[serde(default)]
    pub pay_schedules: Vec<PaySchedule>,
    #[serde(default)]
    pub paychecks: Vec<Paycheck>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub category_spending: Vec<CategorySpending>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub bill_payments: Vec<BillPayment>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "BudgetStore::schema_version_default")]
    pub schema_version: u8,
}

impl Default for BudgetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetStore {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            pay_schedules: Vec::new(),
            paychecks: Vec::new(),
            categories: Vec::new(),
            category_spending: Vec::new(),
            bills: Vec::new(),
            bill_payments: Vec::new(),
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    // --- pay schedules ---

    pub fn insert_pay_schedule(&mut self, schedule: PaySchedule) -> Uuid {
        let id = schedule.id;
        self.pay_schedules.push(schedule);
        self.touch();
        id
    }

    pub fn pay_schedule_for_user(&self, user_id: Uuid) -> Option<&PaySchedule> {
        self.pay_schedules.iter().find(|s| s.user_id == user_id)
    }

    pub fn pay_schedule_for_user_mut(&mut self, user_id: Uuid) -> Option<&mut PaySchedule> {
        self.pay_schedules.iter_mut().find(|s| s.user_id == user_id)
    }

    // --- paychecks ---

    pub fn insert_paycheck(&mut self, paycheck: Paycheck) -> Uuid {
        let id = paycheck.id;
        self.paychecks.push(paycheck);
        self.touch();
        id
    }

    pub fn paycheck(&self, id: Uuid) -> Option<&Paycheck> {
        self.paychecks.iter().find(|p| p.id == id)
    }

    pub fn paycheck_mut(&mut self, id: Uuid) -> Option<&mut Paycheck> {
        self.paychecks.iter_mut().find(|p| p.id == id)
    }

    pub fn current_paycheck(&self, user_id: Uuid) -> Option<&Paycheck> {
        self.paychecks
            .iter()
            .find(|p| p.user_id == user_id && p.is_current)
    }

    /// All of a user's paychecks, newest pay date first.
    pub fn paychecks_for_user(&self, user_id: Uuid) -> Vec<&Paycheck> {
        let mut rows: Vec<&Paycheck> = self
            .paychecks
            .iter()
            .filter(|p| p.user_id == user_id)
            .collect();
        rows.sort_by(|a, b| b.pay_date.cmp(&a.pay_date));
        rows
    }

    // --- categories ---

    pub fn insert_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    pub fn remove_category(&mut self, id: Uuid) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        let removed = self.categories.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// A user's categories in display order.
    pub fn categories_for_user(&self, user_id: Uuid) -> Vec<&Category> {
        let mut rows: Vec<&Category> = self
            .categories
            .iter()
            .filter(|c| c.user_id == user_id)
            .collect();
        rows.sort_by_key(|c| c.priority);
        rows
    }

    // --- category spending (envelopes) ---

    pub fn insert_spending(&mut self, spending: CategorySpending) -> Uuid {
        let id = spending.id;
        self.category_spending.push(spending);
        self.touch();
        id
    }

    pub fn spending_for_paycheck(&self, paycheck_id: Uuid) -> Vec<&CategorySpending> {
        self.category_spending
            .iter()
            .filter(|s| s.paycheck_id == paycheck_id)
            .collect()
    }

    pub fn spending_entry(&self, paycheck_id: Uuid, category_id: Uuid) -> Option<&CategorySpending> {
        self.category_spending
            .iter()
            .find(|s| s.paycheck_id == paycheck_id && s.category_id == category_id)
    }

    pub fn spending_entry_mut(
        &mut self,
        paycheck_id: Uuid,
        category_id: Uuid,
    ) -> Option<&mut CategorySpending> {
        self.category_spending
            .iter_mut()
            .find(|s| s.paycheck_id == paycheck_id && s.category_id == category_id)
    }

    pub fn remove_spending_entry(&mut self, paycheck_id: Uuid, category_id: Uuid) -> bool {
        let before = self.category_spending.len();
        self.category_spending
            .retain(|s| !(s.paycheck_id == paycheck_id && s.category_id == category_id));
        let removed = self.category_spending.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Number of periods (any paycheck) still holding an envelope for the
    /// category. Used to decide whether a template has become orphaned.
    pub fn spending_rows_for_category(&self, category_id: Uuid) -> usize {
        self.category_spending
            .iter()
            .filter(|s| s.category_id == category_id)
            .count()
    }

    // --- bills ---

    pub fn insert_bill(&mut self, bill: Bill) -> Uuid {
        let id = bill.id;
        self.bills.push(bill);
        self.touch();
        id
    }

    pub fn bill(&self, id: Uuid) -> Option<&Bill> {
        self.bills.iter().find(|b| b.id == id)
    }

    pub fn bill_mut(&mut self, id: Uuid) -> Option<&mut Bill> {
        self.bills.iter_mut().find(|b| b.id == id)
    }

    pub fn remove_bill(&mut self, id: Uuid) -> bool {
        let before = self.bills.len();
        self.bills.retain(|b| b.id != id);
        let removed = self.bills.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn bills_for_user(&self, user_id: Uuid) -> Vec<&Bill> {
        self.bills.iter().filter(|b| b.user_id == user_id).collect()
    }

    pub fn active_bills_for_user(&self, user_id: Uuid) -> Vec<&Bill> {
        self.bills
            .iter()
            .filter(|b| b.user_id == user_id && b.is_active)
            .collect()
    }

    // --- bill payments ---

    pub fn insert_payment(&mut self, payment: BillPayment) -> Uuid {
        let id = payment.id;
        self.bill_payments.push(payment);
        self.touch();
        id
    }

    pub fn payment(&self, id: Uuid) -> Option<&BillPayment> {
        self.bill_payments.iter().find(|p| p.id == id)
    }

    pub fn payment_mut(&mut self, id: Uuid) -> Option<&mut BillPayment> {
        self.bill_payments.iter_mut().find(|p| p.id == id)
    }

    pub fn remove_payment(&mut self, id: Uuid) -> bool {
        let before = self.bill_payments.len();
        self.bill_payments.retain(|p| p.id != id);
        let removed = self.bill_payments.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn payments_for_paycheck(&self, paycheck_id: Uuid) -> Vec<&BillPayment> {
        self.bill_payments
            .iter()
            .filter(|p| p.paycheck_id == paycheck_id)
            .collect()
    }

    pub fn payments_for_bill_in(&self, paycheck_id: Uuid, bill_id: Uuid) -> Vec<&BillPayment> {
        self.bill_payments
            .iter()
            .filter(|p| p.paycheck_id == paycheck_id && p.bill_id == bill_id)
            .collect()
    }

    /// Drops a bill's payment links in one paycheck only; payments in other
    /// (historical) paychecks stay behind.
    pub fn remove_payments_for_bill_in(&mut self, paycheck_id: Uuid, bill_id: Uuid) -> usize {
        let before = self.bill_payments.len();
        self.bill_payments
            .retain(|p| !(p.paycheck_id == paycheck_id && p.bill_id == bill_id));
        let removed = before - self.bill_payments.len();
        if removed > 0 {
            self.touch();
        }
        removed
    }

    // --- transactions ---

    pub fn insert_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn transactions_for_paycheck(&self, paycheck_id: Uuid) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.paycheck_id == paycheck_id)
            .collect()
    }

    pub fn remove_transactions_for_category_in(
        &mut self,
        paycheck_id: Uuid,
        category_id: Uuid,
    ) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|t| {
            !(t.paycheck_id == paycheck_id && t.category_id == Some(category_id))
        });
        let removed = before - self.transactions.len();
        if removed > 0 {
            self.touch();
        }
        removed
    }
}

pub use json_backend::JsonStorage;
