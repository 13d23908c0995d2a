//! Event types for inter-service communication.
//!
//! Events flow through the engine's event bus after a state write has
//! succeeded, letting dashboards and notification dispatchers react to
//! lifecycle changes without participating in them.

use crate::{Actor, Order, OrderStatus};
use serde::{Deserialize, Serialize};

/// Main event type encompassing all storefront events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StorefrontEvent {
	/// Events from checkout and the order lifecycle.
	Order(OrderEvent),
}

/// Events related to order creation and status changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OrderEvent {
	/// An order has been created from a cart and durably stored.
	Created { order: Order },
	/// An order's status changed through the lifecycle manager.
	StatusChanged {
		order_id: String,
		from: OrderStatus,
		to: OrderStatus,
		actor: Actor,
	},
}

/// Notification payloads handed to the notification collaborator.
///
/// Delivery of these is fire-and-forget: a failed notification is logged
/// and swallowed, never rolled back into order state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NotificationEvent {
	/// Tell the restaurant a new order is waiting for confirmation.
	OrderPlaced { order_id: String },
	/// Tell the customer their order moved to a new status.
	OrderStatusChanged {
		order_id: String,
		status: OrderStatus,
	},
}
