//! Cart state and line item types.
//!
//! [`CartState`] is a value: every transition builds a new state from the
//! new line list and recomputes `total` and `item_count` from scratch, so the
//! aggregates can never drift from the items.

use crate::cart::{resolve_price, LineKey, VariantSelection};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Cart badges cap their count display at this value.
const BADGE_LIMIT: i64 = 99;

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product ID.
    pub product_id: ProductId,
    /// Product record as it was when the line was created.
    pub product: Product,
    /// Variant choice per dimension.
    pub selected_variants: VariantSelection,
    /// Quantity, always at least 1.
    pub quantity: i64,
    /// Unit price frozen when the line was created.
    pub price: Money,
}

impl LineItem {
    /// Identity of this line.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.selected_variants.clone())
    }

    /// Check whether this line is identified by `product_id` and `selection`.
    pub fn matches(&self, product_id: &ProductId, selection: &VariantSelection) -> bool {
        &self.product_id == product_id && &self.selected_variants == selection
    }

    /// Unit price times quantity.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.price
            .checked_mul(self.quantity)
            .ok_or(CommerceError::Overflow)
    }

    /// Variant summary for display (e.g., "color: Black, size: M").
    pub fn variant_summary(&self) -> String {
        self.selected_variants.describe(&self.product)
    }
}

/// The full cart: items plus derived aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "StoredCart")]
pub struct CartState {
    items: Vec<LineItem>,
    total: Money,
    item_count: i64,
}

impl CartState {
    /// The empty cart.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            total: Money::zero(Currency::default()),
            item_count: 0,
        }
    }

    /// Build a state from `items`, computing the aggregates.
    ///
    /// Fails on mixed currencies or arithmetic overflow.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CommerceError> {
        let currency = items
            .first()
            .map(|i| i.price.currency)
            .unwrap_or_default();

        let mut total = Money::zero(currency);
        let mut item_count: i64 = 0;
        for item in &items {
            let subtotal = item.subtotal()?;
            if subtotal.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: subtotal.currency.code().to_string(),
                });
            }
            total = total
                .checked_add(&subtotal)
                .ok_or(CommerceError::Overflow)?;
            item_count = item_count
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?;
        }

        Ok(Self {
            items,
            total,
            item_count,
        })
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of price times quantity over all lines.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Alias of [`total`](Self::total), before shipping and tax.
    pub fn subtotal(&self) -> Money {
        self.total
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> i64 {
        self.item_count
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item count as shown on a cart badge ("99+" past the limit).
    pub fn badge(&self) -> Option<String> {
        match self.item_count {
            n if n <= 0 => None,
            n if n > BADGE_LIMIT => Some(format!("{}+", BADGE_LIMIT)),
            n => Some(n.to_string()),
        }
    }

    /// Find the line identified by `product_id` and `selection`.
    pub fn line(&self, product_id: &ProductId, selection: &VariantSelection) -> Option<&LineItem> {
        self.items.iter().find(|i| i.matches(product_id, selection))
    }

    /// State after adding `quantity` units of `product` with `selection`.
    ///
    /// An existing line with the same identity grows and keeps its frozen
    /// price; otherwise a new line is appended at the resolved unit price.
    pub fn added(
        &self,
        product: &Product,
        selection: &VariantSelection,
        quantity: i64,
    ) -> Result<Self, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        let mut items = self.items.clone();
        match items
            .iter_mut()
            .find(|i| i.matches(&product.id, selection))
        {
            Some(existing) => {
                let new_quantity = existing
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CommerceError::Overflow)?;
                check_limit(new_quantity)?;
                existing.quantity = new_quantity;
            }
            None => {
                check_limit(quantity)?;
                items.push(LineItem {
                    product_id: product.id.clone(),
                    product: product.clone(),
                    selected_variants: selection.clone(),
                    quantity,
                    price: resolve_price(product, selection).unit_price,
                });
            }
        }

        Self::from_items(items)
    }

    /// State without the identified line. Unchanged if it isn't present.
    pub fn removed(
        &self,
        product_id: &ProductId,
        selection: &VariantSelection,
    ) -> Result<Self, CommerceError> {
        let items = self
            .items
            .iter()
            .filter(|i| !i.matches(product_id, selection))
            .cloned()
            .collect();
        Self::from_items(items)
    }

    /// State with the identified line's quantity set to `quantity`.
    ///
    /// A quantity of zero or below removes the line.
    pub fn updated(
        &self,
        product_id: &ProductId,
        selection: &VariantSelection,
        quantity: i64,
    ) -> Result<Self, CommerceError> {
        if quantity <= 0 {
            return self.removed(product_id, selection);
        }
        check_limit(quantity)?;

        let items = self
            .items
            .iter()
            .map(|i| {
                if i.matches(product_id, selection) {
                    LineItem {
                        quantity,
                        ..i.clone()
                    }
                } else {
                    i.clone()
                }
            })
            .collect();
        Self::from_items(items)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

fn check_limit(quantity: i64) -> Result<(), CommerceError> {
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(())
}

/// Persisted cart shape. Only the items are trusted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCart {
    #[serde(default)]
    items: Vec<LineItem>,
}

impl TryFrom<StoredCart> for CartState {
    type Error = CommerceError;

    fn try_from(stored: StoredCart) -> Result<Self, Self::Error> {
        let items = stored
            .items
            .into_iter()
            .filter(|i| i.quantity >= 1)
            .collect();
        CartState::from_items(items)
    }
}
