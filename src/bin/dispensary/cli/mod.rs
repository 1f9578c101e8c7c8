use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dispensary::{
    cart::{CartError, CartStore},
    catalog::Catalog,
};
use tracing::{debug, warn};

use crate::config::Config;

mod cart;
mod catalog;
mod checkout;

#[derive(Debug, Parser)]
#[command(name = "dispensary", about = "Pharmacy storefront core", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog products matching the given filters
    Catalog(catalog::CatalogArgs),

    /// Build a cart and show its contents
    Cart(cart::CartArgs),

    /// Build a cart and place it as an order
    Checkout(checkout::CheckoutArgs),
}

impl Cli {
    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) async fn run(self) -> Result<()> {
        let catalog = self.config.load_catalog().with_context(|| {
            format!(
                "failed to load catalog fixture '{}' from {}",
                self.config.catalog,
                self.config.fixtures.display()
            )
        })?;

        match self.command {
            Commands::Catalog(args) => catalog::run(&catalog, &args),
            Commands::Cart(args) => cart::run(&catalog, &args),
            Commands::Checkout(args) => checkout::run(&catalog, &args).await,
        }
    }
}

/// A product to add, written `ID` or `ID:QTY`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AddArg {
    pub id: String,
    pub quantity: u32,
}

impl FromStr for AddArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = match s.rsplit_once(':') {
            Some((id, quantity)) => {
                let quantity = quantity
                    .parse::<u32>()
                    .map_err(|err| format!("invalid quantity in '{s}': {err}"))?;

                (id, quantity)
            }
            None => (s, 1),
        };

        if id.is_empty() {
            return Err(format!("missing product id in '{s}'"));
        }

        Ok(Self {
            id: id.to_string(),
            quantity,
        })
    }
}

/// Fill a fresh cart store from `--add` arguments. Out-of-stock products are reported and
/// skipped; unknown products are an error.
pub(crate) fn fill_cart(catalog: &Catalog, adds: &[AddArg]) -> Result<(CartStore, Vec<String>)> {
    let mut store = CartStore::new(catalog.currency());
    let mut notes = Vec::new();

    store.subscribe(|event, version| debug!(?event, version, "cart changed"));

    for add in adds {
        let product = catalog
            .product(&add.id)
            .with_context(|| format!("unknown product '{}'", add.id))?;

        match store.add_item(product, add.quantity) {
            Ok(outcome) if outcome.is_clamped() => notes.push(format!(
                "{}: only {} in stock, quantity limited to {}",
                product.name, product.stock, outcome.quantity
            )),
            Ok(_outcome) => {}
            Err(CartError::OutOfStock(id)) => {
                warn!(product_id = %id, "skipping out-of-stock product");

                notes.push(format!("{}: out of stock, skipped", product.name));
            }
            Err(err) => return Err(err).context(format!("failed to add '{}'", add.id)),
        }
    }

    Ok((store, notes))
}
