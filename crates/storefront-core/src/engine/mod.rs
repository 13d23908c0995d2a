//! Storefront engine orchestrating checkout and the order lifecycle.
//!
//! The engine wires the cart/pricing/checkout core to its collaborators.
//! All status changes funnel through the lifecycle manager's transition
//! table; the engine's own job is ordering: durable state write first,
//! then events, then notifications. Collaborator failures other than
//! notifications propagate untouched.

pub mod event_bus;

use crate::services::{CollaboratorError, NotificationService, PaymentService};
use event_bus::EventBus;
use std::sync::Arc;
use storefront_cart::Cart;
use storefront_catalog::CatalogService;
use storefront_config::Config;
use storefront_order::{checkout, CheckoutError, LifecycleError, OrderLifecycleManager};
use storefront_pricing::PricingCalculator;
use storefront_storage::StorageService;
use storefront_types::{
	truncate_id, Actor, NotificationEvent, Order, OrderEvent, OrderStatus, StorefrontEvent,
};
use thiserror::Error;
use tracing::instrument;

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
	/// Checkout failed; the cart needs adjusting.
	#[error("Checkout error: {0}")]
	Checkout(#[from] CheckoutError),
	/// A status change attempt failed; re-read before retrying.
	#[error("Lifecycle error: {0}")]
	Lifecycle(#[from] LifecycleError),
	/// A non-notification collaborator call failed.
	#[error("Collaborator error: {0}")]
	Collaborator(#[from] CollaboratorError),
}

/// Main engine coordinating checkout, lifecycle, and collaborators.
pub struct StorefrontEngine {
	/// Storefront configuration.
	config: Config,
	/// Pricing calculator built from configuration.
	pricing: PricingCalculator,
	/// Read-only menu catalog collaborator.
	catalog: Arc<dyn CatalogService>,
	/// Payment provider collaborator.
	payment: Arc<dyn PaymentService>,
	/// Fire-and-forget notification collaborator.
	notifier: Arc<dyn NotificationService>,
	/// Sole owner of order status changes.
	lifecycle: Arc<OrderLifecycleManager>,
	/// Event bus for read-side consumers (dashboards etc.).
	event_bus: EventBus,
}

impl StorefrontEngine {
	/// Creates an engine from configuration and collaborator handles.
	pub fn new(
		config: Config,
		storage: Arc<StorageService>,
		catalog: Arc<dyn CatalogService>,
		payment: Arc<dyn PaymentService>,
		notifier: Arc<dyn NotificationService>,
	) -> Self {
		let pricing = PricingCalculator::new(config.pricing.delivery_fee);
		Self {
			config,
			pricing,
			catalog,
			payment,
			notifier,
			lifecycle: Arc::new(OrderLifecycleManager::new(storage)),
			event_bus: EventBus::default(),
		}
	}

	/// The engine's pricing calculator, for building session carts.
	pub fn pricing(&self) -> PricingCalculator {
		self.pricing
	}

	/// The storefront configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Subscribes to engine events.
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<StorefrontEvent> {
		self.event_bus.subscribe()
	}

	/// Converts a cart into a stored Pending order and opens a payment.
	///
	/// The order is durably stored before the payment call is issued; a
	/// payment failure therefore leaves a Pending order behind, which the
	/// customer may cancel or pay again. The restaurant is notified
	/// fire-and-forget.
	#[instrument(skip_all, fields(customer_id = %truncate_id(customer_id)))]
	pub async fn checkout(
		&self,
		cart: &Cart,
		customer_id: &str,
		delivery_address: &str,
		payment_method: &str,
	) -> Result<Order, EngineError> {
		let order = checkout::create_order(
			cart,
			self.catalog.as_ref(),
			&self.pricing,
			customer_id,
			delivery_address,
		)
		.await?;
		let order = self.lifecycle.store_order(&order).await?;
		tracing::info!(
			order_id = %truncate_id(&order.id),
			total = %order.total_price,
			"Order created"
		);

		self.payment
			.create_payment(&order.id, order.total_price, payment_method)
			.await?;

		self.event_bus
			.publish(StorefrontEvent::Order(OrderEvent::Created {
				order: order.clone(),
			}))
			.ok();
		self.notify(
			&order.restaurant_id,
			&NotificationEvent::OrderPlaced {
				order_id: order.id.clone(),
			},
		)
		.await;

		Ok(order)
	}

	/// Payment collaborator confirmed payment: Pending -> Confirmed.
	pub async fn handle_payment_confirmed(&self, order_id: &str) -> Result<Order, EngineError> {
		self.apply_transition(order_id, OrderStatus::Confirmed, Actor::Payment)
			.await
	}

	/// Partner started preparation: Confirmed -> Preparing.
	pub async fn start_preparation(&self, order_id: &str) -> Result<Order, EngineError> {
		self.apply_transition(order_id, OrderStatus::Preparing, Actor::Partner)
			.await
	}

	/// Partner marked the order ready for pickup: Preparing -> Ready.
	pub async fn mark_ready(&self, order_id: &str) -> Result<Order, EngineError> {
		self.apply_transition(order_id, OrderStatus::Ready, Actor::Partner)
			.await
	}

	/// Delivery collaborator reported driver pickup: Ready -> Delivering.
	pub async fn handle_pickup(&self, order_id: &str) -> Result<Order, EngineError> {
		self.apply_transition(order_id, OrderStatus::Delivering, Actor::Delivery)
			.await
	}

	/// Delivery collaborator confirmed delivery: Delivering -> Completed.
	pub async fn handle_delivered(&self, order_id: &str) -> Result<Order, EngineError> {
		self.apply_transition(order_id, OrderStatus::Completed, Actor::Delivery)
			.await
	}

	/// Customer or partner cancellation, permitted only before the order
	/// is handed to a driver.
	pub async fn cancel_order(&self, order_id: &str, actor: Actor) -> Result<Order, EngineError> {
		self.apply_transition(order_id, OrderStatus::Cancelled, actor)
			.await
	}

	/// Reads an order by id.
	pub async fn get_order(&self, order_id: &str) -> Result<Order, EngineError> {
		Ok(self.lifecycle.get_order(order_id).await?)
	}

	/// Applies one transition, then publishes and notifies.
	///
	/// The event and notifications go out only after the state write has
	/// succeeded, never before.
	#[instrument(skip_all, fields(order_id = %truncate_id(order_id), to = %target))]
	async fn apply_transition(
		&self,
		order_id: &str,
		target: OrderStatus,
		actor: Actor,
	) -> Result<Order, EngineError> {
		let order = self
			.lifecycle
			.transition_order(order_id, target, actor)
			.await?;
		let from = order
			.history
			.last()
			.map(|r| r.from)
			.unwrap_or(order.status);

		self.event_bus
			.publish(StorefrontEvent::Order(OrderEvent::StatusChanged {
				order_id: order.id.clone(),
				from,
				to: order.status,
				actor,
			}))
			.ok();

		let event = NotificationEvent::OrderStatusChanged {
			order_id: order.id.clone(),
			status: order.status,
		};
		self.notify(&order.customer_id, &event).await;
		// The restaurant acts on confirmations and cancellations
		if matches!(order.status, OrderStatus::Confirmed | OrderStatus::Cancelled) {
			self.notify(&order.restaurant_id, &event).await;
		}

		Ok(order)
	}

	/// Fire-and-forget notification dispatch: failures are logged with a
	/// caller-visible warning and swallowed, never fatal.
	async fn notify(&self, user_id: &str, event: &NotificationEvent) {
		if let Err(e) = self.notifier.notify(user_id, event).await {
			tracing::warn!(
				user_id = %truncate_id(user_id),
				error = %e,
				"Notification delivery failed"
			);
		}
	}
}
