//! Cart module for the storefront core.
//!
//! This module holds the two guards on everything a customer may order:
//! the option selection validator, a pure function of menu rules and the
//! current selection, and the cart aggregate, which owns the in-progress
//! single-restaurant basket and keeps its monetary projections consistent
//! on every mutation.

use thiserror::Error;

pub mod cart;
pub mod selection;

pub use cart::{Cart, CartLine};

/// Errors raised while mutating a cart or validating a line.
///
/// All of these are recoverable by the caller adjusting input; none are
/// retried automatically.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
	/// The cart is bound to one restaurant and the new item belongs to
	/// another.
	#[error("Cart is bound to restaurant {cart_restaurant_id}, item belongs to {item_restaurant_id}")]
	CrossRestaurantConflict {
		cart_restaurant_id: String,
		item_restaurant_id: String,
	},
	/// An option group's selected-choice count is outside its
	/// [min_choices, max_choices] bounds, or the selection references an
	/// option group the item does not carry.
	#[error("Option constraint violated: {option_id}")]
	OptionConstraintViolated { option_id: String },
	/// A selected choice is not currently available (or unknown to its
	/// option group).
	#[error("Choice unavailable: {choice_id}")]
	ChoiceUnavailable { choice_id: String },
}
