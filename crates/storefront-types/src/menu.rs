//! Menu catalog types.
//!
//! These types are owned by the catalog collaborator and are read-only to
//! the storefront core: the cart validates selections against them and the
//! checkout snapshots their prices, but never mutates them.

use crate::Money;
use serde::{Deserialize, Serialize};

/// A single item on a restaurant's menu, including its option groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
	/// Unique identifier for this item.
	pub id: String,
	/// Identifier of the restaurant this item belongs to.
	pub restaurant_id: String,
	/// Customer-facing item name.
	pub name: String,
	/// Regular unit price.
	pub base_price: Money,
	/// Discounted unit price, if a promotion is active.
	/// Invariant: never exceeds `base_price`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub discount_price: Option<Money>,
	/// Whether the item can currently be ordered.
	pub available: bool,
	/// Option groups in display order.
	#[serde(default)]
	pub options: Vec<MenuItemOption>,
}

impl MenuItem {
	/// Returns the unit price a customer actually pays: the discount price
	/// when present, otherwise the base price.
	pub fn effective_unit_price(&self) -> Money {
		self.discount_price.unwrap_or(self.base_price)
	}

	/// Looks up an option group by id.
	pub fn option(&self, option_id: &str) -> Option<&MenuItemOption> {
		self.options.iter().find(|o| o.id == option_id)
	}
}

/// A named group of choices with cardinality constraints.
///
/// Invariants: `max_choices >= min_choices`, and `required` implies
/// `min_choices >= 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemOption {
	/// Unique identifier for this option group.
	pub id: String,
	/// Customer-facing group name (e.g., "Size", "Toppings").
	pub name: String,
	/// Minimum number of choices that must be selected.
	pub min_choices: u32,
	/// Maximum number of choices that may be selected.
	pub max_choices: u32,
	/// Whether at least one choice must be selected.
	pub required: bool,
	/// Choices in display order.
	pub choices: Vec<MenuItemChoice>,
}

impl MenuItemOption {
	/// Looks up a choice by id within this group.
	pub fn choice(&self, choice_id: &str) -> Option<&MenuItemChoice> {
		self.choices.iter().find(|c| c.id == choice_id)
	}

	/// Returns true if this is a single-choice group (radio semantics).
	pub fn is_single_choice(&self) -> bool {
		self.max_choices == 1
	}
}

/// One selectable choice within an option group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemChoice {
	/// Unique identifier for this choice.
	pub id: String,
	/// Customer-facing choice name.
	pub name: String,
	/// Extra cost added when this choice is selected. Never negative.
	pub surcharge: Money,
	/// Whether the choice can currently be selected.
	pub available: bool,
}
