//! Render
//!
//! Terminal tables for catalog listings, carts and orders.

use std::io;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    orders::Order,
    pricing::{PricingError, to_money},
    products::Product,
};

/// Errors that can occur when rendering a table.
#[derive(Debug, Error)]
pub enum RenderError {
    /// An amount could not be converted for display.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The cart totals could not be computed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Write a catalog listing, one row per product in the given order.
///
/// # Errors
///
/// Returns an error if a price cannot be displayed or the output cannot be written.
pub fn write_catalog(
    mut out: impl io::Write,
    products: &[&Product],
    currency: &'static Currency,
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Brand", "Category", "Price", "Stock", "Rating"]);

    for product in products {
        let name = if product.featured {
            format!("★ {}", product.name)
        } else {
            product.name.clone()
        };

        builder.push_record([
            product.id.to_string(),
            name,
            product.brand.clone(),
            product.category.clone(),
            to_money(product.price, currency)?.to_string(),
            stock_label(product.stock),
            product
                .rating
                .map(|rating| format!("{rating:.1}"))
                .unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(4..7), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| RenderError::IO)?;
    writeln!(out, " {} products", products.len()).map_err(|_err| RenderError::IO)
}

/// Write the cart's lines followed by its item count and subtotal.
///
/// # Errors
///
/// Returns an error if a total cannot be computed or displayed, or the output cannot be
/// written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> Result<(), RenderError> {
    if cart.is_empty() {
        return writeln!(out, " Your cart is empty").map_err(|_err| RenderError::IO);
    }

    let currency = cart.currency();
    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Unit Price", "Qty", "Line Total"]);

    for (idx, line) in cart.lines().iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            line.name().to_string(),
            to_money(line.price(), currency)?.to_string(),
            line.quantity().to_string(),
            to_money(line.total()?, currency)?.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| RenderError::IO)?;

    write_summary(&mut out, cart.item_count(), cart.subtotal()?, currency)
}

/// Write an order's id, status and totals.
///
/// # Errors
///
/// Returns an error if the subtotal cannot be displayed or the output cannot be written.
pub fn write_order(mut out: impl io::Write, order: &Order) -> Result<(), RenderError> {
    let progress = order
        .status()
        .progress()
        .map(|(step, steps)| format!(" (step {step} of {steps})"))
        .unwrap_or_default();

    writeln!(out, " Order:  {}", order.id()).map_err(|_err| RenderError::IO)?;
    writeln!(out, " Status: {}{progress}", order.status()).map_err(|_err| RenderError::IO)?;
    writeln!(out, " Placed: {}", order.placed_at()).map_err(|_err| RenderError::IO)?;

    write_summary(
        &mut out,
        order.item_count(),
        order.subtotal(),
        order.request().currency,
    )
}

fn write_summary(
    out: &mut impl io::Write,
    items: u64,
    subtotal: Decimal,
    currency: &'static Currency,
) -> Result<(), RenderError> {
    let subtotal = to_money(subtotal, currency)?;

    writeln!(out, " Items:    {items}").map_err(|_err| RenderError::IO)?;
    writeln!(out, " \x1b[1mSubtotal: {subtotal}\x1b[0m").map_err(|_err| RenderError::IO)
}

fn stock_label(stock: u32) -> String {
    if stock == 0 {
        "Out of stock".to_string()
    } else {
        stock.to_string()
    }
}
