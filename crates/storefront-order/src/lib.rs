//! Order module for the storefront core.
//!
//! This module covers the two halves of an order's life: checkout, which
//! converts a validated cart into a frozen, priced order snapshot, and the
//! lifecycle manager, which is thereafter the sole owner of the order's
//! status. Status moves only through a single canonical transition table
//! with actor gating and optimistic per-order serialization.

pub mod checkout;
pub mod lifecycle;

pub use checkout::{create_order, CheckoutError};
pub use lifecycle::{LifecycleError, OrderLifecycleManager};
