use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use dispensary::{
    catalog::Catalog,
    checkout::{OrderRequest, ShippingAddress, checkout},
    orders::InMemoryOrderBook,
    render,
};

use crate::cli::{AddArg, fill_cart};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Product to add, as ID or ID:QTY (repeatable)
    #[arg(short, long = "add", value_name = "ID[:QTY]", required = true)]
    adds: Vec<AddArg>,

    /// Recipient name
    #[arg(long)]
    name: String,

    /// First address line
    #[arg(long)]
    line1: String,

    /// Second address line
    #[arg(long)]
    line2: Option<String>,

    /// Town or city
    #[arg(long)]
    city: String,

    /// Postal code
    #[arg(long)]
    postcode: String,

    /// Country code
    #[arg(long, default_value = "GB")]
    country: String,

    /// Contact phone number
    #[arg(long)]
    phone: Option<String>,

    /// Print the order payload as YAML before placing it
    #[arg(long)]
    show_payload: bool,
}

impl CheckoutArgs {
    fn shipping(&self) -> ShippingAddress {
        ShippingAddress {
            name: self.name.clone(),
            line1: self.line1.clone(),
            line2: self.line2.clone(),
            city: self.city.clone(),
            postcode: self.postcode.clone(),
            country: self.country.clone(),
            phone: self.phone.clone(),
        }
    }
}

pub(crate) async fn run(catalog: &Catalog, args: &CheckoutArgs) -> Result<()> {
    let (mut store, notes) = fill_cart(catalog, &args.adds)?;
    let book = InMemoryOrderBook::new();

    let payload = if args.show_payload {
        let request = OrderRequest::from_cart(store.cart(), args.shipping())?;

        Some(serde_norway::to_string(&request)?)
    } else {
        None
    };

    let order_id = checkout(&mut store, args.shipping(), &book)
        .await
        .context("checkout failed")?;

    let order = book.order(order_id)?;
    let mut out = io::stdout().lock();

    for note in &notes {
        writeln!(out, " ! {note}")?;
    }

    if let Some(payload) = payload {
        writeln!(out, "{payload}")?;
    }

    render::write_order(&mut out, &order)?;

    Ok(())
}
