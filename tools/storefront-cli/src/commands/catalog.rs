//! Catalog browsing commands.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::cart::{default_selection, is_purchasable, resolve_price};
use storefront_commerce::catalog::Product;
use storefront_commerce::search::{CatalogQuery, Filter, SortOption};

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::{price_with_original, stock_badge};

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CatalogCommand::List {
        query: None,
        category: None,
        tag: None,
        in_stock: false,
        sort: SortOption::default(),
    }) {
        CatalogCommand::List {
            query,
            category,
            tag,
            in_stock,
            sort,
        } => {
            let mut q = CatalogQuery::new().with_sort(sort);
            if let Some(text) = query {
                q = q.with_query(text);
            }
            if let Some(category) = category {
                q = q.with_category(category);
            }
            if let Some(tag) = tag {
                q = q.with_filter(Filter::tag(tag));
            }
            if in_stock {
                q = q.with_filter(Filter::in_stock());
            }
            list_products(&q, ctx)
        }
        CatalogCommand::Show { product } => show_product(&product, ctx),
        CatalogCommand::Categories => list_categories(ctx),
    }
}

/// Row of a product listing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductRow<'a> {
    id: &'a str,
    name: &'a str,
    category: &'a str,
    price: String,
    rating: f64,
    review_count: u32,
    available: bool,
}

impl<'a> From<&'a Product> for ProductRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            id: product.id.as_str(),
            name: &product.name,
            category: &product.category,
            price: product.price_range_display(),
            rating: product.rating,
            review_count: product.review_count,
            available: product.is_available(),
        }
    }
}

fn list_products(query: &CatalogQuery, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let products = query.apply(catalog.products());

    if ctx.output.is_json() {
        let rows: Vec<ProductRow> = products.iter().map(|p| ProductRow::from(*p)).collect();
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header(&listing_header(query, products.len(), catalog.len()));

    if products.is_empty() {
        ctx.output.info("No products match.");
        return Ok(());
    }

    let widths = [22, 28, 14, 20, 14];
    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "PRICE", "RATING"], &widths);
    for product in products {
        let rating = format!("{:.1} ({})", product.rating, product.review_count);
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &product.category,
                &product.price_range_display(),
                &rating,
            ],
            &widths,
        );
    }

    Ok(())
}

fn listing_header(query: &CatalogQuery, shown: usize, total: usize) -> String {
    if query.is_filtered() {
        format!(
            "Products ({} of {}, by {})",
            shown,
            total,
            query.sort.display_name()
        )
    } else {
        format!("Products ({}, by {})", total, query.sort.display_name())
    }
}

fn show_product(id: &str, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.get(id)?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    if !product.category.is_empty() {
        ctx.output.kv("category", &product.category);
    }
    ctx.output.kv("price", &product.price_range_display());
    ctx.output.kv(
        "rating",
        &format!("{:.1} ({} reviews)", product.rating, product.review_count),
    );
    if !product.tags.is_empty() {
        ctx.output.kv("tags", &product.tags.join(", "));
    }
    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }

    for option in &product.options {
        ctx.output.info("");
        ctx.output.info(&format!("{}:", option.name));
        for variant in product.variants.get(&option.name).into_iter().flatten() {
            ctx.output.list_item(&format!(
                "{:<12} {:<20} {}  {}",
                variant.id.as_str(),
                variant.name,
                price_with_original(variant.price, variant.original_price),
                stock_badge(variant.in_stock)
            ));
        }
    }

    let selection = default_selection(product);
    let resolved = resolve_price(product, &selection);
    ctx.output.info("");
    if selection.is_empty() {
        ctx.output.kv("buy", &resolved.unit_price.display());
    } else {
        ctx.output.kv(
            "default",
            &format!(
                "{} at {}",
                selection.describe(product),
                price_with_original(resolved.unit_price, resolved.original_price)
            ),
        );
    }
    if !is_purchasable(product, &selection) || !product.is_available() {
        ctx.output.warn("Currently unavailable");
    }

    Ok(())
}

fn list_categories(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let categories = catalog.categories();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in categories {
        let count = catalog
            .products()
            .iter()
            .filter(|p| p.category == category)
            .count();
        ctx.output.list_item(&format!("{} ({})", category, count));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_header() {
        let all = CatalogQuery::new().with_sort(SortOption::Rating);
        assert_eq!(listing_header(&all, 5, 5), "Products (5, by Highest Rated)");

        let search = CatalogQuery::new().with_query("tee");
        assert_eq!(
            listing_header(&search, 1, 5),
            format!("Products (1 of 5, by {})", SortOption::default().display_name())
        );
    }
}
