//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};
use storefront_commerce::search::SortOption;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: Option<CatalogCommand>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products, optionally filtered and sorted.
    List {
        /// Text to search for in name, description and tags.
        #[arg(short, long)]
        query: Option<String>,

        /// Category to restrict to ("all" for every category).
        #[arg(long)]
        category: Option<String>,

        /// Tag to restrict to.
        #[arg(short, long)]
        tag: Option<String>,

        /// Only products that can be bought right now.
        #[arg(long)]
        in_stock: bool,

        /// Sort order: name, price-low, price-high, rating, reviews.
        #[arg(short, long, default_value = "name", value_parser = parse_sort)]
        sort: SortOption,
    },
    /// Show a product with its variants.
    Show {
        /// Product ID.
        product: String,
    },
    /// List categories.
    Categories,
}

fn parse_sort(s: &str) -> Result<SortOption, String> {
    SortOption::parse(s).ok_or_else(|| {
        format!(
            "unknown sort '{}' (expected name, price-low, price-high, rating or reviews)",
            s
        )
    })
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart contents and order summary.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product ID.
        product: String,

        /// Variant choice as dimension=variant (repeatable). Unset dimensions
        /// take the first in-stock variant.
        #[arg(long = "variant", value_name = "DIMENSION=VARIANT")]
        variants: Vec<String>,

        /// Quantity to add.
        #[arg(short = 'n', long, default_value = "1", allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line from the cart.
    Remove {
        /// Product ID.
        product: String,

        /// Variant choice identifying the line (repeatable). Optional when
        /// only one line of the product matches.
        #[arg(long = "variant", value_name = "DIMENSION=VARIANT")]
        variants: Vec<String>,
    },
    /// Set the quantity of a line; zero or below removes it.
    Update {
        /// Product ID.
        product: String,

        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        /// Variant choice identifying the line (repeatable). Optional when
        /// only one line of the product matches.
        #[arg(long = "variant", value_name = "DIMENSION=VARIANT")]
        variants: Vec<String>,
    },
    /// Remove everything from the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Read form fields from a JSON file (camelCase keys, e.g. "zipCode").
    #[arg(long)]
    pub form: Option<String>,

    /// Contact email.
    #[arg(long)]
    pub email: Option<String>,

    /// Shipping first name.
    #[arg(long)]
    pub first_name: Option<String>,

    /// Shipping last name.
    #[arg(long)]
    pub last_name: Option<String>,

    /// Street address.
    #[arg(long)]
    pub address: Option<String>,

    /// City.
    #[arg(long)]
    pub city: Option<String>,

    /// State.
    #[arg(long)]
    pub state: Option<String>,

    /// ZIP code.
    #[arg(long)]
    pub zip_code: Option<String>,

    /// Name on card.
    #[arg(long)]
    pub name_on_card: Option<String>,

    /// Card number.
    #[arg(long)]
    pub card_number: Option<String>,

    /// Expiry date (MM/YY).
    #[arg(long)]
    pub expiry_date: Option<String>,

    /// Card security code.
    #[arg(long)]
    pub cvv: Option<String>,

    /// Never prompt for missing fields.
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Catalog path to write into the config.
        #[arg(long, default_value = "data/products.json")]
        catalog: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Check that the config and the catalog it points to load.
    Validate,
}
