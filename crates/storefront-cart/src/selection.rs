//! Option selection validation.
//!
//! Pure functions over menu option rules and a customer's current
//! selection. These run synchronously on every UI edit, so they stay
//! O(options x choices) with no external calls and no side effects.

use crate::ValidationError;
use std::collections::BTreeSet;
use storefront_types::{CartItem, MenuItem, MenuItemOption};

/// Returns true if adding `choice_id` to the current selection would not
/// exceed the option's `max_choices`.
///
/// Single-choice options always accept: selecting replaces the prior
/// choice rather than rejecting. Re-selecting an already selected choice
/// is likewise accepted (the UI treats it as a toggle).
pub fn can_select(option: &MenuItemOption, current: &BTreeSet<String>, choice_id: &str) -> bool {
	if option.is_single_choice() {
		return true;
	}
	if current.contains(choice_id) {
		return true;
	}
	(current.len() as u32) < option.max_choices
}

/// Returns true iff the selection satisfies the option's cardinality
/// bounds, and carries at least one choice when the option is required.
pub fn is_satisfied(option: &MenuItemOption, selection: &BTreeSet<String>) -> bool {
	let count = selection.len() as u32;
	if option.required && count == 0 {
		return false;
	}
	option.min_choices <= count && count <= option.max_choices
}

/// Validates a cart item's selections against its menu item.
///
/// Fails with `OptionConstraintViolated` on the first unsatisfied option
/// group (including selections keyed by an option id the item does not
/// carry), and with `ChoiceUnavailable` when a selected choice is unknown
/// to its group or its availability flag is off.
pub fn validate_cart_item(menu_item: &MenuItem, item: &CartItem) -> Result<(), ValidationError> {
	// Selections must reference option groups the item actually carries.
	for option_id in item.selections.keys() {
		if menu_item.option(option_id).is_none() {
			return Err(ValidationError::OptionConstraintViolated {
				option_id: option_id.clone(),
			});
		}
	}

	for option in &menu_item.options {
		let selection = item.selected(&option.id);
		for choice_id in &selection {
			match option.choice(choice_id) {
				Some(choice) if choice.available => {}
				_ => {
					return Err(ValidationError::ChoiceUnavailable {
						choice_id: choice_id.clone(),
					})
				}
			}
		}
		if !is_satisfied(option, &selection) {
			return Err(ValidationError::OptionConstraintViolated {
				option_id: option.id.clone(),
			});
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use storefront_types::{MenuItemChoice, Money};

	fn choice(id: &str, available: bool) -> MenuItemChoice {
		MenuItemChoice {
			id: id.to_string(),
			name: id.to_string(),
			surcharge: Money::ZERO,
			available,
		}
	}

	fn option(id: &str, min: u32, max: u32, required: bool) -> MenuItemOption {
		MenuItemOption {
			id: id.to_string(),
			name: id.to_string(),
			min_choices: min,
			max_choices: max,
			required,
			choices: vec![
				choice("small", true),
				choice("medium", true),
				choice("large", false),
			],
		}
	}

	fn pizza(options: Vec<MenuItemOption>) -> MenuItem {
		MenuItem {
			id: "pizza".to_string(),
			restaurant_id: "rest-1".to_string(),
			name: "Pizza".to_string(),
			base_price: Money::from_minor(1200),
			discount_price: None,
			available: true,
			options,
		}
	}

	fn set(ids: &[&str]) -> BTreeSet<String> {
		ids.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn test_can_select_single_choice_always_replaces() {
		let size = option("size", 1, 1, true);
		// Even with a prior selection, single-choice accepts the new one
		assert!(can_select(&size, &set(&["small"]), "medium"));
	}

	#[test]
	fn test_can_select_respects_max() {
		let toppings = option("toppings", 0, 2, false);
		assert!(can_select(&toppings, &set(&["small"]), "medium"));
		assert!(!can_select(&toppings, &set(&["small", "medium"]), "large"));
		// Re-selecting an already selected choice is a toggle, not an add
		assert!(can_select(&toppings, &set(&["small", "medium"]), "small"));
	}

	#[test]
	fn test_is_satisfied_bounds() {
		let toppings = option("toppings", 1, 2, false);
		assert!(!is_satisfied(&toppings, &set(&[])));
		assert!(is_satisfied(&toppings, &set(&["small"])));
		assert!(is_satisfied(&toppings, &set(&["small", "medium"])));
		assert!(!is_satisfied(&toppings, &set(&["small", "medium", "large"])));
	}

	#[test]
	fn test_is_satisfied_required_needs_one() {
		let size = option("size", 1, 1, true);
		assert!(!is_satisfied(&size, &set(&[])));
		assert!(is_satisfied(&size, &set(&["small"])));
	}

	#[test]
	fn test_validate_required_group_unselected() {
		let item = pizza(vec![option("size", 1, 1, true)]);
		let cart_item = CartItem::new("pizza", 1);
		assert_eq!(
			validate_cart_item(&item, &cart_item),
			Err(ValidationError::OptionConstraintViolated {
				option_id: "size".to_string()
			})
		);
	}

	#[test]
	fn test_validate_unavailable_choice() {
		let item = pizza(vec![option("size", 1, 1, true)]);
		let cart_item = CartItem::new("pizza", 1).with_choice("size", "large");
		assert_eq!(
			validate_cart_item(&item, &cart_item),
			Err(ValidationError::ChoiceUnavailable {
				choice_id: "large".to_string()
			})
		);
	}

	#[test]
	fn test_validate_unknown_choice_is_unavailable() {
		let item = pizza(vec![option("size", 1, 1, true)]);
		let cart_item = CartItem::new("pizza", 1).with_choice("size", "gigantic");
		assert_eq!(
			validate_cart_item(&item, &cart_item),
			Err(ValidationError::ChoiceUnavailable {
				choice_id: "gigantic".to_string()
			})
		);
	}

	#[test]
	fn test_validate_unknown_option_group() {
		let item = pizza(vec![]);
		let cart_item = CartItem::new("pizza", 1).with_choice("crust", "thin");
		assert_eq!(
			validate_cart_item(&item, &cart_item),
			Err(ValidationError::OptionConstraintViolated {
				option_id: "crust".to_string()
			})
		);
	}

	#[test]
	fn test_validate_ok() {
		let item = pizza(vec![
			option("size", 1, 1, true),
			option("toppings", 0, 2, false),
		]);
		let cart_item = CartItem::new("pizza", 2)
			.with_choice("size", "medium")
			.with_choice("toppings", "small");
		assert_eq!(validate_cart_item(&item, &cart_item), Ok(()));
	}
}
