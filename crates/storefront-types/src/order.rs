//! Order snapshot and lifecycle types.
//!
//! An order is the frozen, priced record produced from a cart at checkout.
//! Prices and option data are copied at submission time and never change
//! afterwards, even if the underlying menu item changes. Status moves only
//! through the lifecycle manager's transition table.

use crate::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A submitted order with its frozen price snapshot and lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
	/// Unique identifier for this order.
	pub id: String,
	/// Customer who placed the order.
	pub customer_id: String,
	/// Restaurant fulfilling the order.
	pub restaurant_id: String,
	/// Line items with prices captured at checkout.
	pub items: Vec<OrderItem>,
	/// Destination address for delivery.
	pub delivery_address: String,
	/// Delivery fee captured at checkout.
	pub delivery_fee: Money,
	/// Grand total captured at checkout; immutable thereafter.
	pub total_price: Money,
	/// Current lifecycle status.
	pub status: OrderStatus,
	/// Version token for optimistic concurrency on status writes.
	pub version: u64,
	/// Timestamp when this order was created (epoch seconds).
	pub created_at: u64,
	/// Timestamp when this order was delivered, once completed.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub delivered_at: Option<u64>,
	/// Immutable record of every status transition applied so far.
	#[serde(default)]
	pub history: Vec<TransitionRecord>,
}

/// One line of a submitted order.
///
/// Carries a price snapshot: `unit_price` is the effective unit price at
/// submission and each selection captures its surcharge at that moment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
	/// Id of the menu item this line was built from.
	pub menu_item_id: String,
	/// Item name at submission time.
	pub name: String,
	/// Number of units ordered.
	pub quantity: u32,
	/// Effective unit price at submission time.
	pub unit_price: Money,
	/// Selected choices with captured surcharges.
	#[serde(default)]
	pub selections: Vec<OrderItemChoice>,
	/// Free-text preparation notes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
}

/// A selected choice captured into an order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemChoice {
	/// Option group the choice belongs to.
	pub option_id: String,
	/// The selected choice.
	pub choice_id: String,
	/// Choice name at submission time.
	pub name: String,
	/// Surcharge at submission time.
	pub surcharge: Money,
}

/// Status of an order in the fulfillment lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
	/// Order has been created but payment is not yet confirmed.
	Pending,
	/// Payment confirmed; awaiting the restaurant.
	Confirmed,
	/// Restaurant has started preparation.
	Preparing,
	/// Prepared and waiting for driver pickup.
	Ready,
	/// Picked up and on its way to the customer.
	Delivering,
	/// Delivered. Terminal.
	Completed,
	/// Cancelled before handoff to a driver. Terminal.
	Cancelled,
}

impl OrderStatus {
	/// Returns true if no further transition is permitted from this status.
	pub fn is_terminal(&self) -> bool {
		matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::Pending => write!(f, "Pending"),
			OrderStatus::Confirmed => write!(f, "Confirmed"),
			OrderStatus::Preparing => write!(f, "Preparing"),
			OrderStatus::Ready => write!(f, "Ready"),
			OrderStatus::Delivering => write!(f, "Delivering"),
			OrderStatus::Completed => write!(f, "Completed"),
			OrderStatus::Cancelled => write!(f, "Cancelled"),
		}
	}
}

/// Who is attempting a lifecycle transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Actor {
	/// The customer who placed the order.
	Customer,
	/// The restaurant partner fulfilling the order.
	Partner,
	/// The payment collaborator (webhook/confirmation events).
	Payment,
	/// The delivery collaborator (pickup/delivered events).
	Delivery,
}

impl fmt::Display for Actor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Actor::Customer => write!(f, "customer"),
			Actor::Partner => write!(f, "partner"),
			Actor::Payment => write!(f, "payment"),
			Actor::Delivery => write!(f, "delivery"),
		}
	}
}

/// An immutable record of one applied status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRecord {
	/// Status before the transition.
	pub from: OrderStatus,
	/// Status after the transition.
	pub to: OrderStatus,
	/// Actor that triggered the transition.
	pub actor: Actor,
	/// When the transition was applied (epoch seconds).
	pub timestamp: u64,
}
