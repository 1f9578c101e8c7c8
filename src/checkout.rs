//! Checkout
//!
//! Turns a cart into an [`OrderRequest`] and hands it to an [`OrderPlacer`]. The cart is only
//! cleared once the placer confirms the order.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::{info, warn};

#[cfg(test)]
use mockall::automock;

use crate::{
    cart::{Cart, CartError, CartStore},
    orders::OrderId,
    products::ProductId,
};

/// Failure reported by the order-placement collaborator. The message is opaque.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlacementError {
    /// The order was refused, e.g. by validation on the backend.
    #[error("order rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached or failed internally.
    #[error("order service unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during checkout.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// A required shipping field is blank.
    #[error("shipping address is missing {0}")]
    InvalidAddress(&'static str),

    /// Wrapped cart error.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Wrapped placement error.
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Where an order is delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShippingAddress {
    /// Recipient name
    pub name: String,

    /// First address line
    pub line1: String,

    /// Second address line (flat, building)
    pub line2: Option<String>,

    /// Town or city
    pub city: String,

    /// Postal code
    pub postcode: String,

    /// ISO 3166 country code, e.g. "GB"
    pub country: String,

    /// Contact phone number
    pub phone: Option<String>,
}

impl ShippingAddress {
    /// Check that every required field has a value.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidAddress`] naming the first blank field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let required = [
            ("name", &self.name),
            ("line1", &self.line1),
            ("city", &self.city),
            ("postcode", &self.postcode),
            ("country", &self.country),
        ];

        match required.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(CheckoutError::InvalidAddress(field)),
            None => Ok(()),
        }
    }
}

/// One line of an order payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    /// Ordered product
    pub product_id: ProductId,

    /// Product name at checkout
    pub name: String,

    /// Unit price at checkout
    pub price: Decimal,

    /// Units ordered
    pub quantity: u32,
}

/// The payload handed to the order-placement collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    /// Ordered lines, in cart order
    pub lines: Vec<OrderLine>,

    /// Delivery address
    pub shipping: ShippingAddress,

    /// Currency of every price in the request
    #[serde(serialize_with = "serialize_currency")]
    pub currency: &'static Currency,

    /// Sum of `price × quantity`, unrounded
    pub subtotal: Decimal,
}

impl OrderRequest {
    /// Build a request from a cart snapshot.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    /// - [`CheckoutError::InvalidAddress`]: a required shipping field is blank.
    /// - [`CheckoutError::Cart`]: the subtotal overflowed.
    pub fn from_cart(cart: &Cart, shipping: ShippingAddress) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        shipping.validate()?;

        let lines = cart
            .lines()
            .iter()
            .map(|line| OrderLine {
                product_id: line.product_id().clone(),
                name: line.name().to_string(),
                price: line.price(),
                quantity: line.quantity(),
            })
            .collect();

        Ok(Self {
            lines,
            shipping,
            currency: cart.currency(),
            subtotal: cart.subtotal()?,
        })
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

fn serialize_currency<S: Serializer>(
    currency: &&'static Currency,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(currency.iso_alpha_code)
}

/// The external service that persists orders.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderPlacer: Send + Sync {
    /// Persist the order and return its identifier.
    async fn place_order(&self, order: &OrderRequest) -> Result<OrderId, PlacementError>;
}

/// Place the cart's contents as an order, clearing the cart on success.
///
/// The cart is left untouched if building the request or placing it fails.
///
/// # Errors
///
/// Returns a [`CheckoutError`] if the request is invalid or the placer fails.
pub async fn checkout<P>(
    store: &mut CartStore,
    shipping: ShippingAddress,
    placer: &P,
) -> Result<OrderId, CheckoutError>
where
    P: OrderPlacer + ?Sized,
{
    let request = OrderRequest::from_cart(store.cart(), shipping)?;

    match placer.place_order(&request).await {
        Ok(order_id) => {
            info!(
                %order_id,
                lines = request.lines.len(),
                items = request.item_count(),
                subtotal = %request.subtotal,
                "order placed"
            );

            store.clear();

            Ok(order_id)
        }
        Err(error) => {
            warn!(%error, "order placement failed");

            Err(error.into())
        }
    }
}
