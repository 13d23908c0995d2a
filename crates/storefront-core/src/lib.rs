//! Core engine for the storefront.
//!
//! This module provides the orchestration layer between the order core and
//! its external collaborators (catalog, payment, notification, delivery
//! events). The engine owns the rule that matters most here: the status
//! write always completes before any collaborator call is issued, and a
//! failed notification is logged and swallowed rather than rolled back
//! into order state.

pub mod engine;
pub mod services;

pub use engine::{EngineError, StorefrontEngine};
pub use services::{CollaboratorError, NotificationService, PaymentRef, PaymentService};
