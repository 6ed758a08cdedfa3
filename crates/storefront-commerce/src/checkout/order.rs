//! Order confirmation produced by a successful checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::checkout::{OrderSummary, ShippingAddress};
use crate::ids::OrderId;

/// What the customer sees after placing an order.
///
/// Held in memory only; nothing is written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// Generated order number.
    pub order_id: OrderId,
    /// Where the receipt goes.
    pub email: String,
    /// Shipping destination.
    pub ship_to: ShippingAddress,
    /// Card used, masked.
    pub card: String,
    /// Cart lines at the moment of submission.
    pub items: Vec<LineItem>,
    /// Totals charged.
    pub summary: OrderSummary,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Total units ordered.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
