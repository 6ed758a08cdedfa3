//! Variant selections and line-item identity.

use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::Product;
use crate::ids::{ProductId, VariantId};
use serde::{Deserialize, Serialize};

/// Chosen variant id per dimension.
///
/// Backed by a sorted map: two selections holding the same pairs are equal
/// no matter in which order they were built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantSelection(BTreeMap<String, VariantId>);

impl VariantSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`select`](Self::select).
    pub fn with(mut self, dimension: impl Into<String>, variant: impl Into<VariantId>) -> Self {
        self.select(dimension, variant);
        self
    }

    /// Choose `variant` for `dimension`, replacing any earlier choice.
    pub fn select(&mut self, dimension: impl Into<String>, variant: impl Into<VariantId>) {
        self.0.insert(dimension.into(), variant.into());
    }

    /// The variant chosen for `dimension`.
    pub fn get(&self, dimension: &str) -> Option<&VariantId> {
        self.0.get(dimension)
    }

    /// Iterate pairs in dimension-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariantId)> {
        self.0.iter().map(|(d, v)| (d.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs in pricing resolution order: the product's option order first,
    /// then dimensions the product doesn't list, by name.
    pub fn resolution_order<'a>(&'a self, product: &'a Product) -> Vec<(&'a str, &'a VariantId)> {
        let mut ordered: Vec<(&str, &VariantId)> = product
            .options
            .iter()
            .filter_map(|o| self.0.get_key_value(o.name.as_str()))
            .map(|(d, v)| (d.as_str(), v))
            .collect();
        for (dimension, variant) in self.iter() {
            if !product.options.iter().any(|o| o.name == dimension) {
                ordered.push((dimension, variant));
            }
        }
        ordered
    }

    /// Human-readable summary such as "color: Midnight Black, size: M".
    ///
    /// Ids that don't resolve against `product` are left out.
    pub fn describe(&self, product: &Product) -> String {
        self.resolution_order(product)
            .into_iter()
            .filter_map(|(dimension, id)| {
                product
                    .variant(dimension, id)
                    .map(|v| format!("{}: {}", dimension, v.name))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<D: Into<String>, V: Into<VariantId>> FromIterator<(D, V)> for VariantSelection {
    fn from_iter<I: IntoIterator<Item = (D, V)>>(iter: I) -> Self {
        let mut selection = Self::new();
        for (dimension, variant) in iter {
            selection.select(dimension, variant);
        }
        selection
    }
}

/// Identity of a cart line: product plus the full variant selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub selection: VariantSelection,
}

impl LineKey {
    pub fn new(product_id: ProductId, selection: VariantSelection) -> Self {
        Self {
            product_id,
            selection,
        }
    }
}

impl fmt::Display for LineKey {
    /// Canonical form, e.g. `tee[color=black,size=m]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.product_id)?;
        for (i, (dimension, variant)) in self.selection.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}={}", dimension, variant)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductVariant;
    use crate::money::Money;

    fn tee() -> Product {
        Product::new("tee", "Tee", Money::usd(2000))
            .with_variant("size", ProductVariant::new("m", "Medium", Money::usd(2000)))
            .with_variant("color", ProductVariant::new("black", "Black", Money::usd(2000)))
    }

    #[test]
    fn test_equality_ignores_build_order() {
        let a = VariantSelection::new().with("color", "black").with("size", "m");
        let b = VariantSelection::new().with("size", "m").with("color", "black");
        assert_eq!(a, b);
        assert_eq!(
            LineKey::new("tee".into(), a).to_string(),
            LineKey::new("tee".into(), b).to_string()
        );
    }

    #[test]
    fn test_select_replaces() {
        let mut selection = VariantSelection::new().with("size", "m");
        selection.select("size", "l");
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.get("size").unwrap().as_str(), "l");
    }

    #[test]
    fn test_resolution_order_follows_options() {
        let product = tee();
        let selection = VariantSelection::new()
            .with("color", "black")
            .with("size", "m")
            .with("engraving", "none");

        let order: Vec<&str> = selection
            .resolution_order(&product)
            .into_iter()
            .map(|(d, _)| d)
            .collect();
        assert_eq!(order, vec!["size", "color", "engraving"]);
    }

    #[test]
    fn test_describe() {
        let product = tee();
        let selection = VariantSelection::new()
            .with("color", "black")
            .with("size", "m")
            .with("size-typo", "m");
        assert_eq!(selection.describe(&product), "size: Medium, color: Black");
    }

    #[test]
    fn test_serializes_as_map() {
        let selection: VariantSelection = [("size", "m"), ("color", "black")].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&selection).unwrap(),
            r#"{"color":"black","size":"m"}"#
        );
    }

    #[test]
    fn test_line_key_display() {
        let key = LineKey::new(
            "tee".into(),
            VariantSelection::new().with("size", "m").with("color", "black"),
        );
        assert_eq!(key.to_string(), "tee[color=black,size=m]");
    }
}
