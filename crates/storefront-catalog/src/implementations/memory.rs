//! In-memory catalog implementation.
//!
//! Backs the CatalogService trait with a HashMap, for tests and local
//! development. Items can be replaced at runtime to exercise the frozen
//! order-snapshot behavior of checkout.

use crate::{CatalogError, CatalogService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use storefront_types::MenuItem;
use tokio::sync::RwLock;

/// In-memory catalog keyed by menu item id.
pub struct MemoryCatalog {
	items: Arc<RwLock<HashMap<String, MenuItem>>>,
}

impl MemoryCatalog {
	/// Creates an empty catalog.
	pub fn new() -> Self {
		Self {
			items: Arc::new(RwLock::new(HashMap::new())),
		}
	}

	/// Inserts or replaces a menu item.
	pub async fn upsert(&self, item: MenuItem) {
		let mut items = self.items.write().await;
		items.insert(item.id.clone(), item);
	}
}

impl Default for MemoryCatalog {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl CatalogService for MemoryCatalog {
	async fn get_menu_item(&self, id: &str) -> Result<MenuItem, CatalogError> {
		let items = self.items.read().await;
		items
			.get(id)
			.cloned()
			.ok_or_else(|| CatalogError::NotFound(id.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use storefront_types::Money;

	fn sample_item() -> MenuItem {
		MenuItem {
			id: "item-1".to_string(),
			restaurant_id: "rest-1".to_string(),
			name: "Margherita".to_string(),
			base_price: Money::from_minor(900),
			discount_price: None,
			available: true,
			options: vec![],
		}
	}

	#[tokio::test]
	async fn test_lookup() {
		let catalog = MemoryCatalog::new();
		catalog.upsert(sample_item()).await;

		let item = catalog.get_menu_item("item-1").await.unwrap();
		assert_eq!(item.name, "Margherita");

		let missing = catalog.get_menu_item("nope").await;
		assert!(matches!(missing, Err(CatalogError::NotFound(_))));
	}
}
