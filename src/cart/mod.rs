//! Cart
//!
//! A [`Cart`] holds at most one [`CartLine`] per product, in the order products were first
//! added. Every mutation keeps each line's quantity between 1 and the stock level copied from
//! the product; requests beyond stock are clamped rather than rejected.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    pricing::{PricingError, to_money, total_price},
    products::{Product, ProductId},
};

mod line;
mod shared;
mod store;

pub use line::CartLine;
pub use shared::SharedCart;
pub use store::{CartEvent, CartStore, SubscriptionKey};

/// Errors raised by cart operations.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// The product has no stock, so it cannot be added.
    #[error("{0} is out of stock")]
    OutOfStock(ProductId),

    /// A quantity of zero was requested when adding a product.
    #[error("invalid quantity {quantity} for {product_id}")]
    InvalidQuantity {
        /// Product the request was made for
        product_id: ProductId,
        /// The rejected quantity
        quantity: u32,
    },

    /// The product is priced in a different currency than the cart (product, cart).
    #[error("product is priced in {0}, but the cart uses {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Wrapped pricing error.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Another holder of a shared cart panicked mid-update.
    #[error("cart lock poisoned")]
    Poisoned,
}

/// Result of adding a product to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// Quantity on the line after the add
    pub quantity: u32,

    /// Quantity before the add, or `None` if the line is new
    pub previous: Option<u32>,

    /// Quantity the caller asked to add
    pub requested: u32,
}

impl AddOutcome {
    /// Whether the line was created by this add.
    #[must_use]
    pub fn is_new_line(&self) -> bool {
        self.previous.is_none()
    }

    /// Whether stock limited the add to fewer units than requested.
    #[must_use]
    pub fn is_clamped(&self) -> bool {
        let previous = self.previous.unwrap_or(0);

        self.quantity < previous.saturating_add(self.requested)
    }

    /// Whether the line quantity differs from before the add.
    #[must_use]
    pub fn changed_quantity(&self) -> bool {
        self.previous != Some(self.quantity)
    }
}

/// Result of a quantity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// No line exists for the product; nothing changed.
    Missing,

    /// A non-positive quantity was requested, so the line was removed.
    Removed,

    /// The line quantity was set (after clamping to stock).
    Set {
        /// Quantity before the update
        from: u32,
        /// Quantity after the update
        to: u32,
    },
}

/// Cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add `quantity` units of a product.
    ///
    /// An existing line grows to `min(existing + quantity, stock)`; otherwise a new line is
    /// appended with `min(quantity, stock)`. The line's copied price and stock are refreshed
    /// from `product` either way.
    ///
    /// # Errors
    ///
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`CartError::OutOfStock`]: the product has no stock; the cart is unchanged.
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<AddOutcome, CartError> {
        if product.currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if product.stock == 0 {
            debug!(product_id = %product.id, "rejected add of out-of-stock product");

            return Err(CartError::OutOfStock(product.id.clone()));
        }

        if quantity == 0 {
            return Err(CartError::InvalidQuantity {
                product_id: product.id.clone(),
                quantity,
            });
        }

        let outcome = if let Some(line) = self.line_mut(&product.id) {
            let previous = line.quantity();
            let next = previous.saturating_add(quantity).min(product.stock);

            line.refresh(product);
            line.set_quantity(next);

            AddOutcome {
                quantity: next,
                previous: Some(previous),
                requested: quantity,
            }
        } else {
            let next = quantity.min(product.stock);

            self.lines.push(CartLine::from_product(product, next));

            AddOutcome {
                quantity: next,
                previous: None,
                requested: quantity,
            }
        };

        if outcome.is_clamped() {
            debug!(
                product_id = %product.id,
                requested = quantity,
                quantity = outcome.quantity,
                stock = product.stock,
                "clamped cart quantity to stock"
            );
        }

        Ok(outcome)
    }

    /// Add a single unit of a product.
    ///
    /// # Errors
    ///
    /// See [`Cart::add_item`].
    pub fn add_one(&mut self, product: &Product) -> Result<AddOutcome, CartError> {
        self.add_item(product, 1)
    }

    /// Remove the line for a product. Returns `false` if there was none.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();

        self.lines.retain(|line| line.product_id() != product_id);

        self.lines.len() < len_before
    }

    /// Set the quantity of a line.
    ///
    /// Values of zero or below remove the line; other values are clamped into `1..=stock`.
    /// Unknown products are ignored.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> QuantityUpdate {
        if quantity <= 0 {
            return if self.remove_item(product_id) {
                QuantityUpdate::Removed
            } else {
                QuantityUpdate::Missing
            };
        }

        let Some(line) = self.line_mut(product_id) else {
            return QuantityUpdate::Missing;
        };

        let from = line.quantity();
        let to = u32::try_from(quantity)
            .unwrap_or(u32::MAX)
            .clamp(1, line.stock().max(1));

        line.set_quantity(to);

        QuantityUpdate::Set { from, to }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Sum of `price × quantity` over all lines, unrounded.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Pricing`] if the total overflows.
    pub fn subtotal(&self) -> Result<Decimal, CartError> {
        let subtotal = total_price(
            self.lines
                .iter()
                .map(|line| (line.price(), line.quantity())),
        )?;

        Ok(subtotal)
    }

    /// The subtotal rounded to minor units for display.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Pricing`] if the total overflows or can't be represented.
    pub fn subtotal_money(&self) -> Result<Money<'static, Currency>, CartError> {
        Ok(to_money(self.subtotal()?, self.currency)?)
    }

    /// Lines in the order their products were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if any.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id() == product_id)
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency all prices in the cart are expressed in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
