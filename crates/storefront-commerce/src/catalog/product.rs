//! Product and variant types.
//!
//! Field names follow the catalog document (`basePrice`, `inStock`, ...),
//! prices are decimal numbers there and [`Money`] here.

use std::collections::BTreeMap;

use crate::error::CommerceError;
use crate::ids::{ProductId, VariantId};
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Category name.
    #[serde(default)]
    pub category: String,
    /// Fallback unit price when no selected variant resolves.
    #[serde(with = "money::decimal")]
    pub base_price: Money,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Variant choices keyed by dimension name (e.g. "color").
    #[serde(default)]
    pub variants: BTreeMap<String, Vec<ProductVariant>>,
    /// User-selectable dimensions in display order.
    #[serde(default)]
    pub options: Vec<ProductOption>,
    /// Average rating.
    #[serde(default)]
    pub rating: f64,
    /// Number of reviews.
    #[serde(default)]
    pub review_count: u32,
    /// Tags for search.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Product {
    /// Create a product with no variants.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, base_price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: String::new(),
            base_price,
            images: Vec::new(),
            variants: BTreeMap::new(),
            options: Vec::new(),
            rating: 0.0,
            review_count: 0,
            tags: Vec::new(),
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Add a variant under `dimension`, registering the dimension as a
    /// selectable option the first time it is seen.
    pub fn with_variant(mut self, dimension: impl Into<String>, variant: ProductVariant) -> Self {
        let dimension = dimension.into();
        match self.options.iter_mut().find(|o| o.name == dimension) {
            Some(option) => option.values.push(variant.name.clone()),
            None => self.options.push(ProductOption {
                name: dimension.clone(),
                values: vec![variant.name.clone()],
            }),
        }
        self.variants.entry(dimension).or_default().push(variant);
        self
    }

    /// Look up a variant by dimension and id.
    pub fn variant(&self, dimension: &str, variant_id: &VariantId) -> Option<&ProductVariant> {
        self.variants
            .get(dimension)?
            .iter()
            .find(|v| &v.id == variant_id)
    }

    /// Like [`variant`](Self::variant), failing with `VariantNotFound`.
    pub fn require_variant(
        &self,
        dimension: &str,
        variant_id: &VariantId,
    ) -> Result<&ProductVariant, CommerceError> {
        self.variant(dimension, variant_id)
            .ok_or_else(|| CommerceError::VariantNotFound {
                dimension: dimension.to_string(),
                variant: variant_id.to_string(),
            })
    }

    /// Iterate over every variant of every dimension.
    pub fn all_variants(&self) -> impl Iterator<Item = &ProductVariant> {
        self.variants.values().flatten()
    }

    /// Lowest and highest variant price, or the base price for a product
    /// without variants.
    pub fn price_range(&self) -> (Money, Money) {
        let mut prices = self.all_variants().map(|v| v.price);
        let Some(first) = prices.next() else {
            return (self.base_price, self.base_price);
        };
        prices.fold((first, first), |(min, max), p| {
            (
                if p.amount_cents < min.amount_cents { p } else { min },
                if p.amount_cents > max.amount_cents { p } else { max },
            )
        })
    }

    /// Format the price range for listings ("$79.99" or "$79.99 - $99.99").
    pub fn price_range_display(&self) -> String {
        let (min, max) = self.price_range();
        if min == max {
            min.display()
        } else {
            format!("{} - {}", min.display(), max.display())
        }
    }

    /// Whether every selectable dimension offers at least one in-stock variant.
    pub fn is_available(&self) -> bool {
        self.options.iter().all(|option| {
            self.variants
                .get(&option.name)
                .map(|vs| vs.iter().any(|v| v.in_stock))
                .unwrap_or(false)
        })
    }
}

/// One concrete choice within a dimension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Identifier, unique within its dimension only.
    pub id: VariantId,
    /// Display name (e.g., "Midnight Black").
    pub name: String,
    /// Price of this variant.
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Original price for showing discounts.
    #[serde(
        default,
        with = "money::decimal::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Money>,
    /// Stock flag.
    pub in_stock: bool,
    /// Variant-specific image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductVariant {
    /// Create an in-stock variant.
    pub fn new(id: impl Into<VariantId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            in_stock: true,
            image: None,
        }
    }

    /// Set the original price.
    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Mark as out of stock.
    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    /// Check if this variant is on sale.
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|op| op.amount_cents > self.price.amount_cents)
            .unwrap_or(false)
    }

    /// Calculate the discount percentage if on sale.
    pub fn discount_percentage(&self) -> Option<f64> {
        self.original_price.and_then(|op| {
            if op.amount_cents > self.price.amount_cents {
                let savings = op.amount_cents - self.price.amount_cents;
                Some((savings as f64 / op.amount_cents as f64) * 100.0)
            } else {
                None
            }
        })
    }
}

/// A selectable dimension (e.g., color with its value names).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductOption {
    /// Dimension name, matching a key of [`Product::variants`].
    pub name: String,
    /// Display values.
    #[serde(default)]
    pub values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADPHONES: &str = r#"{
        "id": "wireless-headphones",
        "name": "Wireless Headphones",
        "description": "Noise cancelling over-ear headphones",
        "category": "Electronics",
        "basePrice": 199.99,
        "images": ["/images/headphones.jpg"],
        "variants": {
            "color": [
                {"id": "black", "name": "Midnight Black", "price": 199.99, "originalPrice": 249.99, "inStock": true},
                {"id": "white", "name": "Pearl White", "price": 209.99, "inStock": false, "image": "/images/white.jpg"}
            ]
        },
        "options": [{"name": "color", "values": ["Midnight Black", "Pearl White"]}],
        "rating": 4.5,
        "reviewCount": 128,
        "tags": ["audio", "wireless"]
    }"#;

    #[test]
    fn test_parse_catalog_record() {
        let product: Product = serde_json::from_str(HEADPHONES).unwrap();
        assert_eq!(product.id.as_str(), "wireless-headphones");
        assert_eq!(product.base_price, Money::usd(19999));
        assert_eq!(product.review_count, 128);

        let black = product.variant("color", &VariantId::new("black")).unwrap();
        assert_eq!(black.original_price, Some(Money::usd(24999)));
        assert!(black.is_on_sale());

        let white = product.variant("color", &VariantId::new("white")).unwrap();
        assert!(!white.in_stock);
        assert_eq!(white.image.as_deref(), Some("/images/white.jpg"));
    }

    #[test]
    fn test_variant_lookup_scoped_to_dimension() {
        let product = Product::new("shirt", "Shirt", Money::usd(2000))
            .with_variant("color", ProductVariant::new("m", "Magenta", Money::usd(2100)))
            .with_variant("size", ProductVariant::new("m", "Medium", Money::usd(2200)));

        assert_eq!(
            product.variant("color", &VariantId::new("m")).unwrap().name,
            "Magenta"
        );
        assert_eq!(
            product.variant("size", &VariantId::new("m")).unwrap().name,
            "Medium"
        );
        assert!(product.variant("fit", &VariantId::new("m")).is_none());
        assert!(matches!(
            product.require_variant("size", &VariantId::new("xl")),
            Err(CommerceError::VariantNotFound { dimension, variant })
                if dimension == "size" && variant == "xl"
        ));
    }

    #[test]
    fn test_price_range() {
        let product: Product = serde_json::from_str(HEADPHONES).unwrap();
        assert_eq!(product.price_range(), (Money::usd(19999), Money::usd(20999)));
        assert_eq!(product.price_range_display(), "$199.99 - $209.99");

        let plain = Product::new("mug", "Mug", Money::usd(1200));
        assert_eq!(plain.price_range_display(), "$12.00");
    }

    #[test]
    fn test_with_variant_registers_options() {
        let product = Product::new("tee", "Tee", Money::usd(1500))
            .with_variant("size", ProductVariant::new("s", "Small", Money::usd(1500)))
            .with_variant("size", ProductVariant::new("l", "Large", Money::usd(1700)));

        assert_eq!(product.options.len(), 1);
        assert_eq!(product.options[0].values, vec!["Small", "Large"]);
        assert_eq!(product.variants["size"].len(), 2);
    }

    #[test]
    fn test_availability() {
        let product = Product::new("tee", "Tee", Money::usd(1500))
            .with_variant(
                "size",
                ProductVariant::new("s", "Small", Money::usd(1500)).out_of_stock(),
            );
        assert!(!product.is_available());

        let product = product
            .with_variant("size", ProductVariant::new("l", "Large", Money::usd(1500)));
        assert!(product.is_available());
    }

    #[test]
    fn test_discount_percentage() {
        let variant = ProductVariant::new("v", "V", Money::usd(2000))
            .with_original_price(Money::usd(3000));
        let discount = variant.discount_percentage().unwrap();
        assert!((discount - 33.33).abs() < 0.1);
    }
}
