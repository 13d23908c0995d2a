//! Pricing module for the storefront core.
//!
//! Derives monetary totals from carts and submitted orders. All arithmetic
//! happens in integer minor units via the `Money` type; decimal rounding
//! only ever occurs at the parse/display boundary. Order totals are
//! computed once at checkout and frozen into the order snapshot, so later
//! catalog price changes never retroactively alter them.

use serde::{Deserialize, Serialize};
use storefront_types::{CartItem, MenuItem, Money, Order, OrderItem};
use thiserror::Error;

/// Errors that can occur while pricing a cart line against the catalog.
///
/// These are unreachable for lines that passed option validation, but the
/// calculator never panics on inconsistent input.
#[derive(Debug, Error)]
pub enum PricingError {
	/// A selection referenced an option group the item does not carry.
	#[error("Unknown option: {0}")]
	UnknownOption(String),
	/// A selection referenced a choice the option group does not carry.
	#[error("Unknown choice: {0}")]
	UnknownChoice(String),
}

/// Calculator for line totals, cart totals, and frozen order totals.
///
/// Carries the flat delivery fee from configuration; everything else is a
/// pure function of its inputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricingCalculator {
	/// Flat delivery fee applied to every non-empty cart.
	pub delivery_fee: Money,
}

impl PricingCalculator {
	/// Creates a calculator with the configured flat delivery fee.
	pub fn new(delivery_fee: Money) -> Self {
		Self { delivery_fee }
	}

	/// Computes the total for one cart line:
	/// `(effective_unit_price + sum of selected surcharges) * quantity`.
	///
	/// Selections are resolved against the menu item the line references.
	pub fn line_total(&self, menu_item: &MenuItem, item: &CartItem) -> Result<Money, PricingError> {
		let mut unit = menu_item.effective_unit_price();
		for (option_id, choice_ids) in &item.selections {
			let option = menu_item
				.option(option_id)
				.ok_or_else(|| PricingError::UnknownOption(option_id.clone()))?;
			for choice_id in choice_ids {
				let choice = option
					.choice(choice_id)
					.ok_or_else(|| PricingError::UnknownChoice(choice_id.clone()))?;
				unit += choice.surcharge;
			}
		}
		Ok(unit * item.quantity)
	}

	/// Computes the total for one frozen order line using only the
	/// surcharges captured at submission time.
	pub fn order_line_total(&self, item: &OrderItem) -> Money {
		let unit = item.unit_price
			+ item
				.selections
				.iter()
				.map(|s| s.surcharge)
				.sum::<Money>();
		unit * item.quantity
	}

	/// Returns the delivery fee for a cart or order with the given
	/// emptiness: the flat fee for non-empty, zero otherwise.
	pub fn delivery_fee_for(&self, is_empty: bool) -> Money {
		if is_empty {
			Money::ZERO
		} else {
			self.delivery_fee
		}
	}

	/// Recomputes an order's grand total from its frozen lines.
	///
	/// At checkout this value is written into `Order.total_price`; after
	/// that the stored value is authoritative and this is only used to
	/// cross-check snapshots.
	pub fn order_total(&self, order: &Order) -> Money {
		order
			.items
			.iter()
			.map(|item| self.order_line_total(item))
			.sum::<Money>()
			+ order.delivery_fee
	}
}
