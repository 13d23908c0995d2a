//! Order lifecycle state machine.
//!
//! Manages order status transitions with validation, ensuring orders move
//! through valid lifecycle states:
//! Pending -> Confirmed -> Preparing -> Ready -> Delivering -> Completed,
//! with Cancelled reachable as a side branch until the order is handed to a
//! driver. Every transition is gated on the actor attempting it and applied
//! with compare-and-swap semantics against the order's version token, so
//! concurrent duplicate triggers resolve to exactly one applied transition.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;
use storefront_storage::{StorageError, StorageKey, StorageService};
use storefront_types::{current_timestamp, Actor, Order, OrderStatus, TransitionRecord};
use thiserror::Error;

/// Errors that can occur during a status change attempt.
///
/// Callers must re-read current state before retrying; the manager never
/// retries on their behalf, since blindly retrying a transition could apply
/// it twice.
#[derive(Debug, Error)]
pub enum LifecycleError {
	/// The requested transition is not in the table for the order's
	/// current status.
	#[error("Invalid transition from {from} to {to}")]
	InvalidTransition { from: OrderStatus, to: OrderStatus },
	/// The transition exists but the actor is not permitted to trigger it.
	#[error("Actor {actor} may not move an order from {from} to {to}")]
	ActorNotPermitted {
		actor: Actor,
		from: OrderStatus,
		to: OrderStatus,
	},
	/// Another writer moved the order between our read and our write.
	#[error("Stale version for order {0}")]
	StaleVersion(String),
	/// The order does not exist.
	#[error("Order not found: {0}")]
	OrderNotFound(String),
	/// The storage backend failed.
	#[error("Storage error: {0}")]
	Storage(String),
}

/// The canonical transition table: (from, to) -> actors permitted to
/// trigger it. Anything absent is invalid; terminal states map nowhere.
///
/// Cancellation is deliberately absent from Ready, Delivering, and
/// Completed: an order already handed to a driver or finished must be
/// handled as a post-hoc refund/dispute process outside this state machine.
static TRANSITIONS: Lazy<HashMap<(OrderStatus, OrderStatus), &'static [Actor]>> =
	Lazy::new(|| {
		use Actor::*;
		use OrderStatus::*;
		HashMap::from([
			((Pending, Confirmed), &[Payment][..]),
			((Pending, Cancelled), &[Customer, Partner][..]),
			((Confirmed, Preparing), &[Partner][..]),
			((Confirmed, Cancelled), &[Customer, Partner][..]),
			((Preparing, Ready), &[Partner][..]),
			((Preparing, Cancelled), &[Partner][..]),
			((Ready, Delivering), &[Delivery][..]),
			((Delivering, Completed), &[Delivery][..]),
		])
	});

/// Manages order status transitions and persistence.
///
/// After checkout this is the sole owner of an order's status; every
/// dashboard and collaborator event funnels through `transition_order`.
pub struct OrderLifecycleManager {
	storage: Arc<StorageService>,
}

impl OrderLifecycleManager {
	pub fn new(storage: Arc<StorageService>) -> Self {
		Self { storage }
	}

	/// Returns the actors permitted to move an order between two statuses,
	/// or None if the transition is not in the table.
	pub fn permitted_actors(from: OrderStatus, to: OrderStatus) -> Option<&'static [Actor]> {
		TRANSITIONS.get(&(from, to)).copied()
	}

	/// Checks if a status transition is valid for any actor.
	pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
		TRANSITIONS.contains_key(&(from, to))
	}

	/// Stores a freshly created order.
	///
	/// The write is conditioned on the order id being unused, so a
	/// duplicate submission surfaces as `StaleVersion` instead of silently
	/// overwriting an existing order.
	pub async fn store_order(&self, order: &Order) -> Result<Order, LifecycleError> {
		let mut order = order.clone();
		order.version = 1;
		self.storage
			.update_if_version(StorageKey::Orders.as_str(), &order.id, &order, 0)
			.await
			.map_err(|e| Self::map_storage_error(e, &order.id))?;
		Ok(order)
	}

	/// Gets an order by id.
	pub async fn get_order(&self, order_id: &str) -> Result<Order, LifecycleError> {
		self.storage
			.retrieve(StorageKey::Orders.as_str(), order_id)
			.await
			.map_err(|e| Self::map_storage_error(e, order_id))
	}

	/// Attempts to move an order to `target`, triggered by `actor`.
	///
	/// Reads the current status plus its version token, verifies the guard,
	/// applies the effect (new status, appended history record, and
	/// `delivered_at` on completion), and writes back conditioned on the
	/// version being unchanged. A failed guard or a lost race leaves the
	/// stored order untouched and is surfaced to the caller, who may
	/// re-read and retry manually.
	pub async fn transition_order(
		&self,
		order_id: &str,
		target: OrderStatus,
		actor: Actor,
	) -> Result<Order, LifecycleError> {
		let (mut order, version): (Order, u64) = self
			.storage
			.retrieve_versioned(StorageKey::Orders.as_str(), order_id)
			.await
			.map_err(|e| Self::map_storage_error(e, order_id))?;

		let from = order.status;
		let actors = Self::permitted_actors(from, target)
			.ok_or(LifecycleError::InvalidTransition { from, to: target })?;
		if !actors.contains(&actor) {
			return Err(LifecycleError::ActorNotPermitted {
				actor,
				from,
				to: target,
			});
		}

		let timestamp = current_timestamp();
		order.status = target;
		order.history.push(TransitionRecord {
			from,
			to: target,
			actor,
			timestamp,
		});
		if target == OrderStatus::Completed {
			order.delivered_at = Some(timestamp);
		}
		order.version = version + 1;

		self.storage
			.update_if_version(StorageKey::Orders.as_str(), order_id, &order, version)
			.await
			.map_err(|e| Self::map_storage_error(e, order_id))?;

		tracing::info!(
			order_id = %storefront_types::truncate_id(order_id),
			%from,
			to = %target,
			%actor,
			"Order status changed"
		);
		Ok(order)
	}

	fn map_storage_error(err: StorageError, order_id: &str) -> LifecycleError {
		match err {
			StorageError::NotFound => LifecycleError::OrderNotFound(order_id.to_string()),
			StorageError::VersionConflict { .. } => {
				LifecycleError::StaleVersion(order_id.to_string())
			}
			other => LifecycleError::Storage(other.to_string()),
		}
	}
}
