//! Demo catalog data for local runs.

use storefront_catalog::implementations::memory::MemoryCatalog;
use storefront_types::{MenuItem, MenuItemChoice, MenuItemOption, Money};

/// A pizza with a required size choice.
pub fn margherita() -> MenuItem {
	MenuItem {
		id: "margherita".to_string(),
		restaurant_id: "trattoria-1".to_string(),
		name: "Pizza Margherita".to_string(),
		base_price: Money::from_minor(950),
		discount_price: None,
		available: true,
		options: vec![MenuItemOption {
			id: "size".to_string(),
			name: "Size".to_string(),
			min_choices: 1,
			max_choices: 1,
			required: true,
			choices: vec![
				MenuItemChoice {
					id: "regular".to_string(),
					name: "Regular".to_string(),
					surcharge: Money::ZERO,
					available: true,
				},
				MenuItemChoice {
					id: "large".to_string(),
					name: "Large".to_string(),
					surcharge: Money::from_minor(250),
					available: true,
				},
			],
		}],
	}
}

/// A dessert with no options and a running promotion.
pub fn tiramisu() -> MenuItem {
	MenuItem {
		id: "tiramisu".to_string(),
		restaurant_id: "trattoria-1".to_string(),
		name: "Tiramisu".to_string(),
		base_price: Money::from_minor(600),
		discount_price: Some(Money::from_minor(450)),
		available: true,
		options: vec![],
	}
}

/// Loads the demo items into the catalog.
pub async fn seed_catalog(catalog: &MemoryCatalog) {
	catalog.upsert(margherita()).await;
	catalog.upsert(tiramisu()).await;
}
