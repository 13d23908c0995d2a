//! Cart line types.
//!
//! A `CartItem` is the customer's raw selection for one menu item; it is
//! validated and priced by the cart aggregate before it becomes a line.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One menu item entry assembled by the customer.
///
/// Selections are grouped by option id; ordering is kept stable via
/// `BTreeMap`/`BTreeSet` so serialized carts compare deterministically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartItem {
	/// Id of the referenced menu item.
	pub menu_item_id: String,
	/// Number of units ordered. Always >= 1 once inside a cart.
	pub quantity: u32,
	/// Selected choice ids keyed by option group id.
	#[serde(default)]
	pub selections: BTreeMap<String, BTreeSet<String>>,
	/// Free-text preparation notes for the kitchen.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
}

impl CartItem {
	/// Creates an item with the given quantity and no selections.
	pub fn new(menu_item_id: impl Into<String>, quantity: u32) -> Self {
		Self {
			menu_item_id: menu_item_id.into(),
			quantity,
			selections: BTreeMap::new(),
			notes: None,
		}
	}

	/// Adds a selected choice under an option group, returning self for
	/// fluent construction.
	pub fn with_choice(
		mut self,
		option_id: impl Into<String>,
		choice_id: impl Into<String>,
	) -> Self {
		self.selections
			.entry(option_id.into())
			.or_default()
			.insert(choice_id.into());
		self
	}

	/// Returns the selected choice ids for an option group, or an empty
	/// set if none were selected.
	pub fn selected(&self, option_id: &str) -> BTreeSet<String> {
		self.selections.get(option_id).cloned().unwrap_or_default()
	}
}
