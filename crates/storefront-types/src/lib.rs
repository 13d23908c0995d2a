//! Common types module for the storefront core.
//!
//! This module defines the core data types and structures shared by the
//! cart, pricing, checkout, and order lifecycle components. It provides a
//! centralized location for domain types to ensure consistency across all
//! storefront crates.

/// Cart line types assembled by a customer before checkout.
pub mod cart;
/// Event types for inter-service communication.
pub mod events;
/// Menu catalog types: items, option groups, and choices.
pub mod menu;
/// Monetary amounts in integer minor units.
pub mod money;
/// Frozen order snapshots, statuses, actors, and transition records.
pub mod order;
/// Utility functions for timestamps and id formatting.
pub mod utils;

// Re-export all types for convenient access
pub use cart::*;
pub use events::*;
pub use menu::*;
pub use money::*;
pub use order::*;
pub use utils::{current_timestamp, truncate_id};
