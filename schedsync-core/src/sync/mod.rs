//! One-way reconciliation of a source event set into a destination store.

mod action_kind;
mod apply;
mod reconcile;
mod store;

pub use action_kind::ActionKind;
pub use apply::{ActionOutcome, SyncReport, apply};
pub use reconcile::{Reconciliation, reconcile};
pub use store::EventStore;
