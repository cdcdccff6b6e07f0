//! Pure, read-only builders turning raw rows into display-ready envelope
//! and bill-grid state. No persistence, no side effects.

pub mod bill_grid;
pub mod envelopes;

pub use bill_grid::{build_bill_grid, BillGridItem};
pub use envelopes::{build_envelopes, Envelope, EnvelopeState, EnvelopeTransaction};
