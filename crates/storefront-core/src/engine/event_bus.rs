//! Event bus for inter-service communication.
//!
//! A thin wrapper over a tokio broadcast channel. Publishing never blocks
//! and a publish with no subscribers is not an error; events are a
//! read-side concern and must not influence order state.

use storefront_types::StorefrontEvent;
use tokio::sync::broadcast;

/// Broadcast channel for storefront events.
#[derive(Clone)]
pub struct EventBus {
	sender: broadcast::Sender<StorefrontEvent>,
}

impl EventBus {
	/// Creates an event bus with the given channel capacity.
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	/// Publishes an event to all current subscribers.
	pub fn publish(
		&self,
		event: StorefrontEvent,
	) -> Result<(), broadcast::error::SendError<StorefrontEvent>> {
		self.sender.send(event).map(|_| ())
	}

	/// Subscribes to all events published after this call.
	pub fn subscribe(&self) -> broadcast::Receiver<StorefrontEvent> {
		self.sender.subscribe()
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(256)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use storefront_types::{Actor, OrderEvent, OrderStatus};

	#[tokio::test]
	async fn test_publish_subscribe() {
		let bus = EventBus::new(8);
		let mut receiver = bus.subscribe();

		bus.publish(StorefrontEvent::Order(OrderEvent::StatusChanged {
			order_id: "o1".to_string(),
			from: OrderStatus::Pending,
			to: OrderStatus::Confirmed,
			actor: Actor::Payment,
		}))
		.unwrap();

		let event = receiver.recv().await.unwrap();
		assert!(matches!(
			event,
			StorefrontEvent::Order(OrderEvent::StatusChanged { .. })
		));
	}

	#[tokio::test]
	async fn test_publish_without_subscribers_is_harmless() {
		let bus = EventBus::new(8);
		// No subscriber; send fails but callers always .ok() this
		let result = bus.publish(StorefrontEvent::Order(OrderEvent::StatusChanged {
			order_id: "o1".to_string(),
			from: OrderStatus::Pending,
			to: OrderStatus::Cancelled,
			actor: Actor::Customer,
		}));
		assert!(result.is_err());
	}
}
