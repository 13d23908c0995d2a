//! Collaborator interfaces consumed by the engine.
//!
//! Payment and notification are external services reached over the
//! network; the engine only sees these narrow traits. Calls are issued
//! strictly after the corresponding state write has succeeded. Callers set
//! their own request timeouts on their implementations; the core imposes
//! none.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storefront_types::{Money, NotificationEvent};
use thiserror::Error;

/// Errors from catalog/payment/notification collaborators.
///
/// Propagated to the caller untouched, except notification failures, which
/// the engine logs and swallows.
#[derive(Debug, Error)]
pub enum CollaboratorError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when the collaborator rejects the request.
	#[error("Rejected: {0}")]
	Rejected(String),
}

/// Reference to a payment created at the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRef {
	/// Provider-side identifier for the payment.
	pub payment_id: String,
	/// Redirect URL for provider-hosted flows, when applicable.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub redirect_url: Option<String>,
}

/// Trait defining the interface to the payment provider.
///
/// Confirmation arrives asynchronously as a webhook/event and is fed into
/// the engine via `handle_payment_confirmed`; this trait only covers the
/// outbound creation call.
#[async_trait]
pub trait PaymentService: Send + Sync {
	/// Creates a payment for an order at the provider.
	async fn create_payment(
		&self,
		order_id: &str,
		amount: Money,
		method: &str,
	) -> Result<PaymentRef, CollaboratorError>;
}

/// Trait defining the fire-and-forget notification interface.
#[async_trait]
pub trait NotificationService: Send + Sync {
	/// Delivers a notification to a user. Failure is non-fatal by design.
	async fn notify(&self, user_id: &str, event: &NotificationEvent)
		-> Result<(), CollaboratorError>;
}
