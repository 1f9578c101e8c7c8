//! Cart Lines

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    pricing::{PricingError, line_total},
    products::{Product, ProductId},
};

/// One product in the cart.
///
/// Name, price, stock, image and category are copied from the product when it is added, so
/// the cart can be displayed and totalled without going back to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    product_id: ProductId,
    name: String,
    price: Decimal,
    stock: u32,
    image_url: Option<String>,
    category: String,
    quantity: u32,
}

impl CartLine {
    /// Callers guarantee `1 <= quantity <= product.stock`.
    pub(crate) fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            stock: product.stock,
            image_url: product.image_url.clone(),
            category: product.category.clone(),
            quantity,
        }
    }

    /// Re-copy the denormalized fields from a newer snapshot of the same product.
    pub(crate) fn refresh(&mut self, product: &Product) {
        self.name.clone_from(&product.name);
        self.price = product.price;
        self.stock = product.stock;
        self.image_url.clone_from(&product.image_url);
        self.category.clone_from(&product.category);
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Identifier of the product on this line.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Product name at the time it was added.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price at the time it was added.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Stock level at the time it was added; the upper bound for [`CartLine::quantity`].
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Product image location.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Product category.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Units of the product in the cart.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `price × quantity` at full precision.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total leaves the decimal range.
    pub fn total(&self) -> Result<Decimal, PricingError> {
        line_total(self.price, self.quantity)
    }
}
