//! Cart aggregate.
//!
//! Owns the in-progress selection for one customer session: the restaurant
//! binding, the priced lines, and the derived projections. Mutation is
//! single-writer (one session), so no locking is involved; every mutation
//! re-derives the projections eagerly, keeping all reads O(1).

use crate::{selection, ValidationError};
use serde::{Deserialize, Serialize};
use storefront_pricing::{PricingCalculator, PricingError};
use storefront_types::{CartItem, MenuItem, Money};
use uuid::Uuid;

/// One priced line in the cart.
///
/// `unit_total` is the effective unit price plus all selected surcharges,
/// cached at add time so quantity updates never need a catalog round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
	/// Unique id for referencing this line in mutations.
	pub id: String,
	/// The customer's raw selection.
	pub item: CartItem,
	/// Per-unit price including surcharges.
	pub unit_total: Money,
	/// `unit_total * quantity`.
	pub line_total: Money,
}

/// The mutable, single-restaurant basket a customer assembles before
/// checkout.
///
/// Invariants: all lines share one restaurant; the restaurant binding is
/// cleared exactly when the line list becomes empty; identical adds are
/// kept as distinct lines, never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
	pricing: PricingCalculator,
	restaurant_id: Option<String>,
	lines: Vec<CartLine>,
	item_count: u32,
	subtotal: Money,
}

impl Cart {
	/// Creates an empty cart priced with the given calculator.
	pub fn new(pricing: PricingCalculator) -> Self {
		Self {
			pricing,
			restaurant_id: None,
			lines: Vec::new(),
			item_count: 0,
			subtotal: Money::ZERO,
		}
	}

	/// Appends a validated, priced line for `menu_item`.
	///
	/// Fails with `CrossRestaurantConflict` if the cart is non-empty and
	/// bound to a different restaurant, leaving the cart unchanged. A
	/// quantity of zero is clamped to one. Returns the new line's id.
	pub fn add_item(
		&mut self,
		menu_item: &MenuItem,
		mut item: CartItem,
	) -> Result<String, ValidationError> {
		if let Some(cart_restaurant_id) = &self.restaurant_id {
			if *cart_restaurant_id != menu_item.restaurant_id {
				return Err(ValidationError::CrossRestaurantConflict {
					cart_restaurant_id: cart_restaurant_id.clone(),
					item_restaurant_id: menu_item.restaurant_id.clone(),
				});
			}
		}

		selection::validate_cart_item(menu_item, &item)?;

		item.quantity = item.quantity.max(1);
		let unit_total = self
			.pricing
			.line_total(menu_item, &CartItem {
				quantity: 1,
				..item.clone()
			})
			.map_err(|e| match e {
				// Unreachable after validation, kept typed for totality
				PricingError::UnknownOption(option_id) => {
					ValidationError::OptionConstraintViolated { option_id }
				}
				PricingError::UnknownChoice(choice_id) => {
					ValidationError::ChoiceUnavailable { choice_id }
				}
			})?;

		let line = CartLine {
			id: Uuid::new_v4().to_string(),
			line_total: unit_total * item.quantity,
			unit_total,
			item,
		};
		let line_id = line.id.clone();
		self.restaurant_id = Some(menu_item.restaurant_id.clone());
		self.lines.push(line);
		self.recompute();
		Ok(line_id)
	}

	/// Removes the line with the given id. Clears the restaurant binding
	/// when the cart becomes empty. Unknown ids are a no-op.
	pub fn remove_item(&mut self, line_id: &str) {
		self.lines.retain(|l| l.id != line_id);
		self.recompute();
	}

	/// Sets the quantity of a line. A quantity of zero removes the line,
	/// exactly as `remove_item` would.
	pub fn update_quantity(&mut self, line_id: &str, quantity: u32) {
		if quantity == 0 {
			self.remove_item(line_id);
			return;
		}
		if let Some(line) = self.lines.iter_mut().find(|l| l.id == line_id) {
			line.item.quantity = quantity;
			line.line_total = line.unit_total * quantity;
		}
		self.recompute();
	}

	/// Empties the cart and clears the restaurant binding.
	pub fn clear(&mut self) {
		self.lines.clear();
		self.recompute();
	}

	/// The restaurant this cart is bound to, None when empty.
	pub fn restaurant_id(&self) -> Option<&str> {
		self.restaurant_id.as_deref()
	}

	/// The priced lines in insertion order.
	pub fn lines(&self) -> &[CartLine] {
		&self.lines
	}

	/// True when the cart holds no lines.
	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	/// Sum of quantities across all lines.
	pub fn item_count(&self) -> u32 {
		self.item_count
	}

	/// Sum of line totals.
	pub fn subtotal(&self) -> Money {
		self.subtotal
	}

	/// Flat delivery fee iff the cart is non-empty, zero otherwise.
	pub fn delivery_fee(&self) -> Money {
		self.pricing.delivery_fee_for(self.is_empty())
	}

	/// `subtotal + delivery_fee`.
	pub fn total(&self) -> Money {
		self.subtotal + self.delivery_fee()
	}

	/// Re-derives the cached projections and the restaurant binding.
	fn recompute(&mut self) {
		self.item_count = self.lines.iter().map(|l| l.item.quantity).sum();
		self.subtotal = self.lines.iter().map(|l| l.line_total).sum();
		if self.lines.is_empty() {
			self.restaurant_id = None;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use storefront_types::{MenuItemChoice, MenuItemOption};

	fn pricing() -> PricingCalculator {
		PricingCalculator::new(Money::from_minor(250))
	}

	fn menu_item(id: &str, restaurant_id: &str, price_minor: i64) -> MenuItem {
		MenuItem {
			id: id.to_string(),
			restaurant_id: restaurant_id.to_string(),
			name: id.to_string(),
			base_price: Money::from_minor(price_minor),
			discount_price: None,
			available: true,
			options: vec![],
		}
	}

	#[test]
	fn test_add_item_totals() {
		// Empty cart, add 2 x 10.00 from restaurant 7:
		// subtotal 20.00, fee 2.50, total 22.50
		let mut cart = Cart::new(pricing());
		cart.add_item(&menu_item("dish", "7", 1000), CartItem::new("dish", 2))
			.unwrap();

		assert_eq!(cart.restaurant_id(), Some("7"));
		assert_eq!(cart.item_count(), 2);
		assert_eq!(cart.subtotal(), Money::from_minor(2000));
		assert_eq!(cart.delivery_fee(), Money::from_minor(250));
		assert_eq!(cart.total(), Money::from_minor(2250));
	}

	#[test]
	fn test_empty_cart_has_no_fee() {
		let cart = Cart::new(pricing());
		assert_eq!(cart.delivery_fee(), Money::ZERO);
		assert_eq!(cart.total(), Money::ZERO);
		assert_eq!(cart.restaurant_id(), None);
	}

	#[test]
	fn test_total_identity_holds_across_mutations() {
		let mut cart = Cart::new(pricing());
		let a = cart
			.add_item(&menu_item("a", "7", 500), CartItem::new("a", 1))
			.unwrap();
		cart.add_item(&menu_item("b", "7", 750), CartItem::new("b", 3))
			.unwrap();
		cart.update_quantity(&a, 4);

		assert_eq!(cart.total(), cart.subtotal() + cart.delivery_fee());
		assert_eq!(cart.subtotal(), Money::from_minor(4 * 500 + 3 * 750));
	}

	#[test]
	fn test_cross_restaurant_conflict_leaves_cart_unchanged() {
		let mut cart = Cart::new(pricing());
		cart.add_item(&menu_item("a", "rest-a", 1000), CartItem::new("a", 1))
			.unwrap();
		let before_subtotal = cart.subtotal();

		let err = cart
			.add_item(&menu_item("b", "rest-b", 500), CartItem::new("b", 1))
			.unwrap_err();
		assert!(matches!(
			err,
			ValidationError::CrossRestaurantConflict { .. }
		));
		assert_eq!(cart.lines().len(), 1);
		assert_eq!(cart.subtotal(), before_subtotal);
		assert_eq!(cart.restaurant_id(), Some("rest-a"));
	}

	#[test]
	fn test_identical_adds_stay_distinct_lines() {
		let mut cart = Cart::new(pricing());
		let item = menu_item("dish", "7", 1000);
		cart.add_item(&item, CartItem::new("dish", 1)).unwrap();
		cart.add_item(&item, CartItem::new("dish", 1)).unwrap();

		assert_eq!(cart.lines().len(), 2);
		assert_eq!(cart.item_count(), 2);
	}

	#[test]
	fn test_update_quantity_zero_removes() {
		let mut cart = Cart::new(pricing());
		let line_id = cart
			.add_item(&menu_item("dish", "7", 1000), CartItem::new("dish", 2))
			.unwrap();

		cart.update_quantity(&line_id, 0);
		assert!(cart.is_empty());
		assert_eq!(cart.restaurant_id(), None);
		assert_eq!(cart.delivery_fee(), Money::ZERO);
	}

	#[test]
	fn test_remove_last_line_clears_binding() {
		let mut cart = Cart::new(pricing());
		let line_id = cart
			.add_item(&menu_item("dish", "7", 1000), CartItem::new("dish", 1))
			.unwrap();

		cart.remove_item(&line_id);
		assert!(cart.is_empty());
		assert_eq!(cart.restaurant_id(), None);
	}

	#[test]
	fn test_clear() {
		let mut cart = Cart::new(pricing());
		cart.add_item(&menu_item("dish", "7", 1000), CartItem::new("dish", 5))
			.unwrap();
		cart.clear();

		assert!(cart.is_empty());
		assert_eq!(cart.item_count(), 0);
		assert_eq!(cart.subtotal(), Money::ZERO);
		assert_eq!(cart.restaurant_id(), None);
	}

	#[test]
	fn test_surcharges_priced_into_line() {
		let mut item = menu_item("pizza", "7", 1200);
		item.options = vec![MenuItemOption {
			id: "size".to_string(),
			name: "Size".to_string(),
			min_choices: 1,
			max_choices: 1,
			required: true,
			choices: vec![MenuItemChoice {
				id: "large".to_string(),
				name: "Large".to_string(),
				surcharge: Money::from_minor(300),
				available: true,
			}],
		}];

		let mut cart = Cart::new(pricing());
		cart.add_item(
			&item,
			CartItem::new("pizza", 2).with_choice("size", "large"),
		)
		.unwrap();

		// (12.00 + 3.00) * 2
		assert_eq!(cart.subtotal(), Money::from_minor(3000));
	}

	#[test]
	fn test_add_rejects_invalid_selection() {
		let mut item = menu_item("pizza", "7", 1200);
		item.options = vec![MenuItemOption {
			id: "size".to_string(),
			name: "Size".to_string(),
			min_choices: 1,
			max_choices: 1,
			required: true,
			choices: vec![],
		}];

		let mut cart = Cart::new(pricing());
		let err = cart.add_item(&item, CartItem::new("pizza", 1)).unwrap_err();
		assert!(matches!(
			err,
			ValidationError::OptionConstraintViolated { .. }
		));
		assert!(cart.is_empty());
	}
}
