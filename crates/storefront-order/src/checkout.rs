//! Checkout: converting a cart into a frozen order.
//!
//! Checkout re-fetches every referenced menu item from the catalog,
//! re-validates every line, and snapshots unit prices and selected-choice
//! surcharges into the order. The resulting total is computed once here and
//! never recomputed: later catalog price changes must not retroactively
//! alter a submitted order.

use storefront_cart::{selection, Cart, ValidationError};
use storefront_catalog::{CatalogError, CatalogService};
use storefront_pricing::PricingCalculator;
use storefront_types::{
	current_timestamp, Money, Order, OrderItem, OrderItemChoice, OrderStatus,
};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while converting a cart into an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
	/// The cart holds no lines; there is nothing to order.
	#[error("Cart is empty")]
	EmptyCart,
	/// A cart line failed re-validation against the current catalog.
	#[error("Validation failed: {0}")]
	Validation(#[from] ValidationError),
	/// A referenced menu item could not be fetched from the catalog.
	#[error("Catalog error: {0}")]
	Catalog(#[from] CatalogError),
}

/// Creates a frozen order from the cart's current contents.
///
/// Every line is validated against the catalog as it stands now, then its
/// effective unit price and each selected choice's surcharge are captured
/// into the order. The order starts in `Pending` with an empty transition
/// history; payment confirmation moves it onward.
pub async fn create_order(
	cart: &Cart,
	catalog: &dyn CatalogService,
	pricing: &PricingCalculator,
	customer_id: &str,
	delivery_address: &str,
) -> Result<Order, CheckoutError> {
	if cart.is_empty() {
		return Err(CheckoutError::EmptyCart);
	}
	// Non-empty carts always carry a restaurant binding
	let restaurant_id = cart.restaurant_id().unwrap_or_default().to_string();

	let mut items = Vec::with_capacity(cart.lines().len());
	for line in cart.lines() {
		let menu_item = catalog.get_menu_item(&line.item.menu_item_id).await?;
		selection::validate_cart_item(&menu_item, &line.item)?;

		let mut selections = Vec::new();
		for (option_id, choice_ids) in &line.item.selections {
			for choice_id in choice_ids {
				// Resolution cannot fail after validation, but stays typed
				let choice = menu_item
					.option(option_id)
					.and_then(|o| o.choice(choice_id))
					.ok_or_else(|| ValidationError::ChoiceUnavailable {
						choice_id: choice_id.clone(),
					})?;
				selections.push(OrderItemChoice {
					option_id: option_id.clone(),
					choice_id: choice_id.clone(),
					name: choice.name.clone(),
					surcharge: choice.surcharge,
				});
			}
		}

		items.push(OrderItem {
			menu_item_id: menu_item.id.clone(),
			name: menu_item.name.clone(),
			quantity: line.item.quantity,
			unit_price: menu_item.effective_unit_price(),
			selections,
			notes: line.item.notes.clone(),
		});
	}

	let subtotal: Money = items.iter().map(|i| pricing.order_line_total(i)).sum();
	let delivery_fee = pricing.delivery_fee_for(false);

	Ok(Order {
		id: Uuid::new_v4().to_string(),
		customer_id: customer_id.to_string(),
		restaurant_id,
		items,
		delivery_address: delivery_address.to_string(),
		delivery_fee,
		total_price: subtotal + delivery_fee,
		status: OrderStatus::Pending,
		version: 0,
		created_at: current_timestamp(),
		delivered_at: None,
		history: Vec::new(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use storefront_catalog::implementations::memory::MemoryCatalog;
	use storefront_types::{CartItem, MenuItem, MenuItemChoice, MenuItemOption};

	fn pricing() -> PricingCalculator {
		PricingCalculator::new(Money::from_minor(250))
	}

	fn pasta() -> MenuItem {
		MenuItem {
			id: "pasta".to_string(),
			restaurant_id: "rest-1".to_string(),
			name: "Pasta".to_string(),
			base_price: Money::from_minor(1100),
			discount_price: Some(Money::from_minor(950)),
			available: true,
			options: vec![MenuItemOption {
				id: "sauce".to_string(),
				name: "Sauce".to_string(),
				min_choices: 1,
				max_choices: 1,
				required: true,
				choices: vec![MenuItemChoice {
					id: "pesto".to_string(),
					name: "Pesto".to_string(),
					surcharge: Money::from_minor(50),
					available: true,
				}],
			}],
		}
	}

	async fn filled_cart(catalog: &MemoryCatalog) -> Cart {
		catalog.upsert(pasta()).await;
		let mut cart = Cart::new(pricing());
		cart.add_item(
			&pasta(),
			CartItem::new("pasta", 2).with_choice("sauce", "pesto"),
		)
		.unwrap();
		cart
	}

	#[tokio::test]
	async fn test_empty_cart_is_rejected() {
		let catalog = MemoryCatalog::new();
		let cart = Cart::new(pricing());
		let result = create_order(&cart, &catalog, &pricing(), "cust-1", "1 Main St").await;
		assert!(matches!(result, Err(CheckoutError::EmptyCart)));
	}

	#[tokio::test]
	async fn test_snapshot_captures_prices_and_surcharges() {
		let catalog = MemoryCatalog::new();
		let cart = filled_cart(&catalog).await;

		let order = create_order(&cart, &catalog, &pricing(), "cust-1", "1 Main St")
			.await
			.unwrap();

		assert_eq!(order.status, OrderStatus::Pending);
		assert_eq!(order.restaurant_id, "rest-1");
		assert_eq!(order.items.len(), 1);
		// Discount price wins, surcharge captured
		assert_eq!(order.items[0].unit_price, Money::from_minor(950));
		assert_eq!(order.items[0].selections[0].surcharge, Money::from_minor(50));
		// (9.50 + 0.50) * 2 + 2.50
		assert_eq!(order.total_price, Money::from_minor(2250));
		assert!(order.history.is_empty());
	}

	#[tokio::test]
	async fn test_total_frozen_against_catalog_changes() {
		let catalog = MemoryCatalog::new();
		let cart = filled_cart(&catalog).await;

		let order = create_order(&cart, &catalog, &pricing(), "cust-1", "1 Main St")
			.await
			.unwrap();
		let frozen_total = order.total_price;

		// Raise the catalog price after submission
		let mut expensive = pasta();
		expensive.discount_price = None;
		expensive.base_price = Money::from_minor(5000);
		catalog.upsert(expensive).await;

		// The snapshot is self-contained; recomputing from it agrees
		assert_eq!(pricing().order_total(&order), frozen_total);
	}

	#[tokio::test]
	async fn test_revalidates_against_current_catalog() {
		let catalog = MemoryCatalog::new();
		let cart = filled_cart(&catalog).await;

		// The selected choice goes unavailable between cart and checkout
		let mut changed = pasta();
		changed.options[0].choices[0].available = false;
		catalog.upsert(changed).await;

		let result = create_order(&cart, &catalog, &pricing(), "cust-1", "1 Main St").await;
		assert!(matches!(
			result,
			Err(CheckoutError::Validation(
				ValidationError::ChoiceUnavailable { .. }
			))
		));
	}

	#[tokio::test]
	async fn test_missing_menu_item_propagates() {
		let catalog = MemoryCatalog::new();
		let cart = filled_cart(&catalog).await;

		// Simulate the catalog losing the item
		let fresh = MemoryCatalog::new();
		let result = create_order(&cart, &fresh, &pricing(), "cust-1", "1 Main St").await;
		assert!(matches!(result, Err(CheckoutError::Catalog(_))));
	}
}
