//! Checkout submission state machine.
//!
//! `Editing -> Processing -> Complete`. Processing only simulates payment: it
//! waits for the configured delay and then always succeeds.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use storefront_cache::Store;

use crate::cart::CartEngine;
use crate::checkout::{CheckoutForm, OrderConfirmation};
use crate::error::CommerceError;
use crate::ids::OrderId;

/// How long a submission spends in `Processing` unless configured otherwise.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_secs(2);

/// Where a checkout session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStatus {
    /// Form being filled in.
    #[default]
    Editing,
    /// Submitted, waiting on the simulated payment.
    Processing,
    /// Order placed.
    Complete,
}

impl CheckoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStatus::Editing => "editing",
            CheckoutStatus::Processing => "processing",
            CheckoutStatus::Complete => "complete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStatus::Editing => "Editing",
            CheckoutStatus::Processing => "Processing",
            CheckoutStatus::Complete => "Complete",
        }
    }
}

/// One pass through checkout.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    /// Form contents.
    pub form: CheckoutForm,
    status: CheckoutStatus,
    processing_delay: Duration,
    confirmation: Option<OrderConfirmation>,
}

impl CheckoutSession {
    /// Start a session with the default processing delay.
    pub fn new(form: CheckoutForm) -> Self {
        Self {
            form,
            status: CheckoutStatus::Editing,
            processing_delay: DEFAULT_PROCESSING_DELAY,
            confirmation: None,
        }
    }

    /// Override the processing delay.
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }

    pub fn status(&self) -> CheckoutStatus {
        self.status
    }

    pub fn processing_delay(&self) -> Duration {
        self.processing_delay
    }

    /// The placed order, once complete.
    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// Submit the order for the cart held by `engine`.
    ///
    /// Rejected without any state change when the session isn't editing, the
    /// cart is empty, or the form has errors. On success the cart is cleared
    /// and the confirmation returned.
    pub async fn submit<S: Store>(
        &mut self,
        engine: &mut CartEngine<S>,
    ) -> Result<&OrderConfirmation, CommerceError> {
        if self.status != CheckoutStatus::Editing {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.status.as_str().to_string(),
                to: CheckoutStatus::Processing.as_str().to_string(),
            });
        }
        if engine.state().is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        self.form.validate().map_err(CommerceError::InvalidForm)?;

        self.status = CheckoutStatus::Processing;
        tracing::debug!(
            lines = engine.state().unique_item_count(),
            delay_ms = self.processing_delay.as_millis() as u64,
            "processing checkout"
        );
        tokio::time::sleep(self.processing_delay).await;

        let confirmation = OrderConfirmation {
            order_id: OrderId::generate(),
            email: self.form.email.trim().to_string(),
            ship_to: self.form.shipping.clone(),
            card: self.form.payment.masked_card_number(),
            items: engine.state().items().to_vec(),
            summary: engine.summary(),
            placed_at: Utc::now(),
        };
        engine.clear_cart();

        tracing::info!(
            order = %confirmation.order_id,
            total = %confirmation.summary.total,
            "order placed"
        );
        self.status = CheckoutStatus::Complete;
        Ok(self.confirmation.insert(confirmation))
    }
}
