//! Products

use std::{
    borrow::Borrow,
    fmt::{Display, Formatter, Result as FmtResult},
};

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};

/// Catalog identifier of a product, as assigned by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Product
///
/// A read-only snapshot of a catalog entry. Carts and catalog queries never mutate products;
/// they are created and updated by the catalog collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Long-form description, searched alongside the name
    pub description: String,

    /// Unit price, never negative
    pub price: Decimal,

    /// Currency the price is expressed in
    pub currency: &'static Currency,

    /// Category, matched exactly by catalog filters
    pub category: String,

    /// Brand, matched exactly by catalog filters
    pub brand: String,

    /// Units available for sale
    pub stock: u32,

    /// Promoted products sort first under the default ordering
    pub featured: bool,

    /// Average customer rating between 1.0 and 5.0, when rated
    pub rating: Option<Decimal>,

    /// Product image location
    pub image_url: Option<String>,
}

impl Product {
    /// Create an unfeatured, out-of-stock product with the given price. Use the `with_*`
    /// methods to fill in the rest.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Decimal,
        currency: &'static Currency,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            currency,
            category: String::new(),
            brand: String::new(),
            stock: 0,
            featured: false,
            rating: None,
            image_url: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the brand.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Set the available stock.
    #[must_use]
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Set whether the product is featured.
    #[must_use]
    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// Set the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: Decimal) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the image location.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Whether any units are available.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
