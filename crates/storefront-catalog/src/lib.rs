//! Catalog collaborator interface for the storefront core.
//!
//! The menu catalog is owned by an external service; this crate defines the
//! narrow read-only interface the cart and checkout consume, plus an
//! in-memory implementation for tests and local development. The core never
//! mutates catalog data.

use async_trait::async_trait;
use storefront_types::MenuItem;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod memory;
}

/// Errors that can occur during catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
	/// Error that occurs when the requested menu item does not exist.
	#[error("Menu item not found: {0}")]
	NotFound(String),
	/// Error that occurs in the catalog backend.
	#[error("Backend error: {0}")]
	Backend(String),
}

/// Trait defining the read-only interface to the menu catalog.
///
/// Implementations wrap whatever service owns the menu data. Lookups are
/// asynchronous; callers set their own request timeouts.
#[async_trait]
pub trait CatalogService: Send + Sync {
	/// Retrieves a menu item with its option groups and availability.
	async fn get_menu_item(&self, id: &str) -> Result<MenuItem, CatalogError>;
}
