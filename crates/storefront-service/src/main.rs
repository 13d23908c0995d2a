//! Main entry point for the storefront service.
//!
//! This binary wires the storefront engine to in-memory implementations of
//! its collaborators and walks one order through the full lifecycle, from
//! cart to delivery. It exists for local development and as executable
//! documentation of the wiring; real deployments supply their own catalog,
//! payment, and notification implementations.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use storefront_cart::Cart;
use storefront_config::Config;
use storefront_core::StorefrontEngine;
use storefront_storage::{implementations::memory::MemoryStorage, StorageService};
use storefront_types::{Actor, CartItem};

mod collaborators;
mod demo;

use collaborators::{ConsoleNotifier, FakePaymentProvider};
use storefront_catalog::implementations::memory::MemoryCatalog;

/// Command-line arguments for the storefront service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the storefront service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the engine with in-memory implementations
/// 5. Runs one order through the full lifecycle
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	tracing::info!("Started storefront");

	// Load configuration
	let config = Config::from_file(&args.config)?;
	tracing::info!("Loaded configuration [{}]", config.storefront.id);

	// Wire the engine with in-memory implementations
	let catalog = Arc::new(MemoryCatalog::new());
	demo::seed_catalog(&catalog).await;

	let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
	let engine = StorefrontEngine::new(
		config,
		storage,
		catalog,
		Arc::new(FakePaymentProvider),
		Arc::new(ConsoleNotifier),
	);

	run_demo_order(&engine).await?;

	Ok(())
}

/// Walks one order through the full lifecycle.
async fn run_demo_order(engine: &StorefrontEngine) -> Result<(), Box<dyn std::error::Error>> {
	let mut cart = Cart::new(engine.pricing());
	cart.add_item(
		&demo::margherita(),
		CartItem::new("margherita", 2).with_choice("size", "large"),
	)?;
	cart.add_item(&demo::tiramisu(), CartItem::new("tiramisu", 1))?;
	tracing::info!(
		items = cart.item_count(),
		subtotal = %cart.subtotal(),
		total = %cart.total(),
		currency = %engine.config().storefront.currency,
		"Cart assembled"
	);

	let order = engine
		.checkout(&cart, "customer-demo", "1 Main Street", "card")
		.await?;

	engine.handle_payment_confirmed(&order.id).await?;
	engine.start_preparation(&order.id).await?;
	engine.mark_ready(&order.id).await?;

	// Too late to cancel once the order is ready for pickup
	if let Err(e) = engine.cancel_order(&order.id, Actor::Customer).await {
		tracing::info!(error = %e, "Late cancellation rejected as expected");
	}

	engine.handle_pickup(&order.id).await?;
	let done = engine.handle_delivered(&order.id).await?;
	tracing::info!(
		order_id = %done.id,
		total = %done.total_price,
		transitions = done.history.len(),
		"Order completed"
	);

	Ok(())
}
