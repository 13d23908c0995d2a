//! Local stand-ins for the payment and notification collaborators.
//!
//! Both log what a real integration would send over the network. The
//! payment provider accepts everything; confirmation is driven manually by
//! the demo flow, the way a webhook would drive it in production.

use async_trait::async_trait;
use storefront_core::{CollaboratorError, NotificationService, PaymentRef, PaymentService};
use storefront_types::{Money, NotificationEvent};

/// Payment provider that accepts every payment.
pub struct FakePaymentProvider;

#[async_trait]
impl PaymentService for FakePaymentProvider {
	async fn create_payment(
		&self,
		order_id: &str,
		amount: Money,
		method: &str,
	) -> Result<PaymentRef, CollaboratorError> {
		tracing::info!(%order_id, %amount, method, "Payment created");
		Ok(PaymentRef {
			payment_id: format!("pay-{}", order_id),
			redirect_url: None,
		})
	}
}

/// Notifier that writes notifications to the log.
pub struct ConsoleNotifier;

#[async_trait]
impl NotificationService for ConsoleNotifier {
	async fn notify(
		&self,
		user_id: &str,
		event: &NotificationEvent,
	) -> Result<(), CollaboratorError> {
		tracing::info!(%user_id, ?event, "Notification sent");
		Ok(())
	}
}
