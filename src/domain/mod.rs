//! Budgeting domain entities: pay schedules, paychecks, categories,
//! envelopes, bills, payments, and the ad-hoc spending log.

pub mod bill;
pub mod category;
pub mod pay_schedule;
pub mod paycheck;
pub mod transaction;

pub use bill::{Bill, BillFrequency, BillPayment};
pub use category::{Category, CategoryKind, CategorySpending};
pub use pay_schedule::{PayFrequency, PaySchedule};
pub use paycheck::Paycheck;
pub use transaction::Transaction;
