//! Unit price resolution for a product and variant selection.
//!
//! Variant prices override rather than combine: walking the selection in
//! resolution order, each variant found replaces the running unit price, so
//! the last resolved dimension wins. Ids that don't resolve contribute
//! nothing.

use crate::cart::VariantSelection;
use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Effective prices for a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPrice {
    /// Price charged per unit.
    pub unit_price: Money,
    /// Original price shown struck through, if any variant carries one.
    pub original_price: Option<Money>,
}

impl ResolvedPrice {
    /// Whether the original price is strictly above the unit price.
    pub fn has_discount(&self) -> bool {
        self.original_price
            .map(|op| op.amount_cents > self.unit_price.amount_cents)
            .unwrap_or(false)
    }

    /// Savings per unit when discounted.
    pub fn savings(&self) -> Option<Money> {
        if !self.has_discount() {
            return None;
        }
        self.original_price
            .and_then(|op| op.checked_sub(&self.unit_price))
    }
}

/// Resolve the unit and original price of `selection` for `product`.
pub fn resolve_price(product: &Product, selection: &VariantSelection) -> ResolvedPrice {
    let mut resolved = ResolvedPrice {
        unit_price: product.base_price,
        original_price: None,
    };

    for (dimension, variant_id) in selection.resolution_order(product) {
        let Some(variant) = product.variant(dimension, variant_id) else {
            continue;
        };
        resolved.unit_price = variant.price;
        if let Some(original) = variant.original_price {
            resolved.original_price = Some(original);
        }
    }

    resolved
}

/// Whether every selected variant exists and is in stock.
///
/// An empty selection is purchasable.
pub fn is_purchasable(product: &Product, selection: &VariantSelection) -> bool {
    selection.iter().all(|(dimension, variant_id)| {
        product
            .variant(dimension, variant_id)
            .map(|v| v.in_stock)
            .unwrap_or(false)
    })
}

/// The initial selection offered for `product`: the first in-stock variant
/// of each option. Options with nothing in stock stay unselected.
pub fn default_selection(product: &Product) -> VariantSelection {
    let mut selection = VariantSelection::new();
    for option in &product.options {
        let first_in_stock = product
            .variants
            .get(&option.name)
            .and_then(|variants| variants.iter().find(|v| v.in_stock));
        if let Some(variant) = first_in_stock {
            selection.select(option.name.clone(), variant.id.clone());
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductVariant;

    fn shirt() -> Product {
        Product::new("shirt", "Shirt", Money::usd(2000))
            .with_variant("color", ProductVariant::new("red", "Red", Money::usd(2500)))
            .with_variant(
                "color",
                ProductVariant::new("blue", "Blue", Money::usd(2400))
                    .with_original_price(Money::usd(2900)),
            )
            .with_variant("size", ProductVariant::new("m", "Medium", Money::usd(3000)))
            .with_variant(
                "size",
                ProductVariant::new("xl", "Extra Large", Money::usd(3200)).out_of_stock(),
            )
    }

    #[test]
    fn test_base_price_without_selection() {
        let resolved = resolve_price(&shirt(), &VariantSelection::new());
        assert_eq!(resolved.unit_price, Money::usd(2000));
        assert_eq!(resolved.original_price, None);
    }

    #[test]
    fn test_last_dimension_in_option_order_wins() {
        let product = shirt();
        // Built size-first; options order is color then size, so size resolves last.
        let selection = VariantSelection::new().with("size", "m").with("color", "red");
        assert_eq!(resolve_price(&product, &selection).unit_price, Money::usd(3000));

        let color_only = VariantSelection::new().with("color", "red");
        assert_eq!(resolve_price(&product, &color_only).unit_price, Money::usd(2500));
    }

    #[test]
    fn test_unknown_variant_contributes_nothing() {
        let product = shirt();
        let selection = VariantSelection::new().with("color", "red").with("size", "xxs");
        assert_eq!(resolve_price(&product, &selection).unit_price, Money::usd(2500));

        let unknown_dimension = VariantSelection::new().with("fit", "slim");
        assert_eq!(
            resolve_price(&product, &unknown_dimension).unit_price,
            Money::usd(2000)
        );
    }

    #[test]
    fn test_original_price_survives_later_dimension() {
        let product = shirt();
        let selection = VariantSelection::new().with("color", "blue").with("size", "m");
        let resolved = resolve_price(&product, &selection);
        assert_eq!(resolved.unit_price, Money::usd(3000));
        assert_eq!(resolved.original_price, Some(Money::usd(2900)));
        // Original below the unit price is not a discount.
        assert!(!resolved.has_discount());
        assert_eq!(resolved.savings(), None);
    }

    #[test]
    fn test_discount() {
        let product = shirt();
        let resolved = resolve_price(&product, &VariantSelection::new().with("color", "blue"));
        assert!(resolved.has_discount());
        assert_eq!(resolved.savings(), Some(Money::usd(500)));
    }

    #[test]
    fn test_stock_check() {
        let product = shirt();
        assert!(is_purchasable(
            &product,
            &VariantSelection::new().with("color", "red").with("size", "m")
        ));
        assert!(!is_purchasable(
            &product,
            &VariantSelection::new().with("color", "red").with("size", "xl")
        ));
        assert!(!is_purchasable(
            &product,
            &VariantSelection::new().with("color", "green")
        ));
        assert!(is_purchasable(&product, &VariantSelection::new()));
    }

    #[test]
    fn test_default_selection_skips_out_of_stock() {
        let product = shirt().with_variant(
            "fit",
            ProductVariant::new("slim", "Slim", Money::usd(2000)).out_of_stock(),
        );
        let selection = default_selection(&product);
        assert_eq!(selection.get("color").unwrap().as_str(), "red");
        assert_eq!(selection.get("size").unwrap().as_str(), "m");
        assert!(selection.get("fit").is_none());
    }
}
