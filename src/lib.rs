#![doc(test(attr(deny(warnings))))]

//! Paycheck Core implements the pay-period allocation and reconciliation
//! engine behind a paycheck-oriented budgeting workflow: bill occurrence
//! generation, envelope seeding, aggregate recomputation, and period
//! rollover.

pub mod domain;
pub mod errors;
pub mod money;
pub mod period;
pub mod services;
pub mod store;
pub mod utils;
pub mod view;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Paycheck Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
