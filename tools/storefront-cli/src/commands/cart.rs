//! Cart commands.

use anyhow::{anyhow, bail, Context as _, Result};
use dialoguer::Confirm;
use serde_json::json;
use storefront_commerce::cart::{
    default_selection, is_purchasable, CartState, VariantSelection,
};
use storefront_commerce::catalog::Product;
use storefront_commerce::checkout::OrderSummary;
use storefront_commerce::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::{Cart, Context};

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add {
            product,
            variants,
            quantity,
        } => add(&mut cart, &product, &variants, quantity, ctx)?,
        CartCommand::Remove { product, variants } => {
            let product_id = ProductId::new(&product);
            let selection = line_selection(cart.state(), &product_id, parse_selection(&variants)?);
            if !cart.remove_from_cart(&product_id, &selection)? {
                ctx.output
                    .warn(&format!("{} is not in the cart", describe_line(&product, &selection)));
            } else {
                ctx.output.success(&format!("Removed {}", product));
            }
        }
        CartCommand::Update {
            product,
            quantity,
            variants,
        } => {
            let product_id = ProductId::new(&product);
            let selection = line_selection(cart.state(), &product_id, parse_selection(&variants)?);
            if !cart.update_quantity(&product_id, &selection, quantity)? {
                ctx.output
                    .warn(&format!("{} is not in the cart", describe_line(&product, &selection)));
            } else if quantity <= 0 {
                ctx.output.success(&format!("Removed {}", product));
            } else {
                ctx.output
                    .success(&format!("Set {} to quantity {}", product, quantity));
            }
        }
        CartCommand::Clear { yes } => {
            if cart.state().is_empty() {
                ctx.output.info("Cart is already empty");
            } else {
                if !yes && !ctx.output.is_json() {
                    let confirmed = Confirm::new()
                        .with_prompt(format!(
                            "Remove all {} items from the cart?",
                            cart.state().item_count()
                        ))
                        .default(false)
                        .interact()?;

                    if !confirmed {
                        ctx.output.warn("Clear cancelled");
                        return Ok(());
                    }
                }
                cart.clear_cart();
                ctx.output.success("Cart cleared");
            }
        }
    }

    print_cart(&cart, ctx);
    Ok(())
}

fn add(
    cart: &mut Cart,
    product_id: &str,
    variants: &[String],
    quantity: i64,
    ctx: &Context,
) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.get(product_id)?;

    let mut selection = default_selection(product);
    for (dimension, variant) in parse_selection(variants)?.iter() {
        product.require_variant(dimension, variant)?;
        selection.select(dimension, variant.clone());
    }
    check_purchasable(product, &selection)?;

    cart.add_to_cart(product, &selection, quantity)
        .with_context(|| format!("Failed to add {}", product.name))?;

    let line = cart
        .state()
        .line(&product.id, &selection)
        .map(|l| l.quantity)
        .unwrap_or(quantity);
    let label = if selection.is_empty() {
        product.name.clone()
    } else {
        format!("{} ({})", product.name, selection.describe(product))
    };
    ctx.output
        .success(&format!("Added {} x {} (now {} in cart)", quantity, label, line));
    Ok(())
}

/// Parse `dimension=variant` pairs.
pub fn parse_selection(pairs: &[String]) -> Result<VariantSelection> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(d, v)| (d.trim(), v.trim()))
                .filter(|(d, v)| !d.is_empty() && !v.is_empty())
                .map(|(d, v)| (d.to_string(), v.to_string()))
                .ok_or_else(|| anyhow!("Invalid variant '{}', expected DIMENSION=VARIANT", pair))
        })
        .collect()
}

/// Pick the cart line that `flags` refer to.
///
/// An exact match wins. Otherwise, if exactly one line of `product_id`
/// agrees with every flag, that line's selection is used, so a line added
/// with its default variants can be addressed by product id alone.
fn line_selection(
    state: &CartState,
    product_id: &ProductId,
    flags: VariantSelection,
) -> VariantSelection {
    if state.line(product_id, &flags).is_some() {
        return flags;
    }

    let mut candidates = state.items().iter().filter(|item| {
        &item.product_id == product_id
            && flags
                .iter()
                .all(|(d, v)| item.selected_variants.get(d) == Some(v))
    });
    match (candidates.next(), candidates.next()) {
        (Some(only), None) => only.selected_variants.clone(),
        _ => flags,
    }
}

fn check_purchasable(product: &Product, selection: &VariantSelection) -> Result<()> {
    if is_purchasable(product, selection) {
        return Ok(());
    }
    let unavailable: Vec<String> = selection
        .iter()
        .filter(|(d, v)| !product.variant(d, v).map(|v| v.in_stock).unwrap_or(false))
        .map(|(d, v)| format!("{}={}", d, v))
        .collect();
    bail!(
        "{} is out of stock in {}",
        product.name,
        unavailable.join(", ")
    )
}

fn describe_line(product: &str, selection: &VariantSelection) -> String {
    if selection.is_empty() {
        product.to_string()
    } else {
        let pairs: Vec<String> = selection
            .iter()
            .map(|(d, v)| format!("{}={}", d, v))
            .collect();
        format!("{} [{}]", product, pairs.join(", "))
    }
}

/// Print the cart and its order summary.
pub fn print_cart(cart: &Cart, ctx: &Context) {
    let state = cart.state();
    let summary = cart.summary();

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "cart": state, "summary": summary }));
        return;
    }

    print_lines(state, ctx);
    if !state.is_empty() {
        print_summary(&summary, ctx);
    }
}

fn print_lines(state: &CartState, ctx: &Context) {
    match state.badge() {
        Some(badge) => ctx.output.header(&format!("Cart ({})", badge)),
        None => {
            ctx.output.header("Cart");
            ctx.output.info("Your cart is empty");
            return;
        }
    }

    let widths = [30, 26, 5, 10, 10];
    ctx.output
        .table_row(&["ITEM", "OPTIONS", "QTY", "PRICE", "SUBTOTAL"], &widths);
    for item in state.items() {
        let subtotal = item
            .subtotal()
            .map(|m| m.display())
            .unwrap_or_else(|_| "-".to_string());
        ctx.output.table_row(
            &[
                &item.product.name,
                &item.variant_summary(),
                &item.quantity.to_string(),
                &item.price.display(),
                &subtotal,
            ],
            &widths,
        );
    }
}

/// Print shipping, tax and total.
pub fn print_summary(summary: &OrderSummary, ctx: &Context) {
    ctx.output.info("");
    ctx.output.kv("Subtotal", &summary.subtotal.display());
    let shipping = if summary.has_free_shipping() {
        "FREE".to_string()
    } else {
        summary.shipping.display()
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Tax", &summary.tax.display());
    ctx.output.kv("Total", &summary.total.display());
    if let Some(remaining) = summary.amount_to_free_shipping() {
        ctx.output.info(&format!(
            "Add {} more for free shipping",
            remaining.display()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::catalog::CatalogStore;

    fn pairs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_selection() {
        let selection = parse_selection(&pairs(&["size=m", " color = black "])).unwrap();
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.get("color").unwrap().as_str(), "black");
        assert_eq!(selection.get("size").unwrap().as_str(), "m");
    }

    #[test]
    fn test_parse_selection_rejects_malformed() {
        assert!(parse_selection(&pairs(&["size"])).is_err());
        assert!(parse_selection(&pairs(&["=m"])).is_err());
        assert!(parse_selection(&pairs(&["size="])).is_err());
        assert!(parse_selection(&[]).unwrap().is_empty());
    }

    fn catalog() -> CatalogStore {
        CatalogStore::from_json_str(include_str!("../../../../data/products.json")).unwrap()
    }

    #[test]
    fn test_default_line_found_by_product_id() {
        let catalog = catalog();
        let mut state = CartState::new();
        for product in catalog.products().iter().filter(|p| p.is_available()) {
            state = state.added(product, &default_selection(product), 2).unwrap();
        }

        for product in catalog.products().iter().filter(|p| p.is_available()) {
            let selection = line_selection(&state, &product.id, VariantSelection::new());
            assert!(state.line(&product.id, &selection).is_some(), "{}", product.id);
            state = state.removed(&product.id, &selection).unwrap();
        }
        assert!(state.is_empty());
    }

    #[test]
    fn test_flags_narrow_between_lines() {
        let catalog = catalog();
        let tee = catalog.get("classic-tee").unwrap();
        let small = VariantSelection::new().with("color", "black").with("size", "s");
        let medium = VariantSelection::new().with("color", "black").with("size", "m");
        let state = CartState::new()
            .added(tee, &small, 1)
            .unwrap()
            .added(tee, &medium, 1)
            .unwrap();

        // Two tee lines: the bare product id is ambiguous.
        let bare = line_selection(&state, &tee.id, VariantSelection::new());
        assert!(state.line(&tee.id, &bare).is_none());

        let flags = parse_selection(&pairs(&["size=m"])).unwrap();
        assert_eq!(line_selection(&state, &tee.id, flags), medium);

        let exact = line_selection(&state, &tee.id, small.clone());
        assert_eq!(exact, small);
    }

    #[test]
    fn test_describe_line() {
        let selection = parse_selection(&pairs(&["size=m"])).unwrap();
        assert_eq!(describe_line("tee", &selection), "tee [size=m]");
        assert_eq!(describe_line("mug", &VariantSelection::new()), "mug");
    }
}
