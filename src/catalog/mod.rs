//! Catalog
//!
//! A [`Catalog`] holds the latest product snapshot delivered by the catalog collaborator.
//! Queries are pure: they borrow the snapshot and never change it, so callers simply re-run
//! them whenever the snapshot or the criteria change.

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::iso::Currency;
use smallvec::SmallVec;
use thiserror::Error;

use crate::products::{Product, ProductId};

mod filter;
mod query;
mod sort;

pub use filter::{FilterCriteria, PriceRange};
pub use query::query;
pub use sort::SortOption;

/// Errors raised while building catalog queries or snapshots.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// The lower price bound is above the upper bound.
    #[error("price range minimum {min} is greater than maximum {max}")]
    InvertedPriceRange {
        /// Requested lower bound
        min: Decimal,
        /// Requested upper bound
        max: Decimal,
    },

    /// A price or price bound is below zero.
    #[error("price {0} is negative")]
    NegativePrice(Decimal),

    /// The sort key is not one of [`SortOption::ALL`].
    #[error("unknown sort option: {0}")]
    UnknownSortOption(String),

    /// A product is priced in a different currency than the catalog (product, catalog).
    #[error("product {0} is priced in {1}, but the catalog uses {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// Two products share an identifier.
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),
}

/// Distinct values present in a catalog, for populating filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    /// Categories, sorted
    pub categories: SmallVec<[String; 8]>,

    /// Brands, sorted
    pub brands: SmallVec<[String; 8]>,

    /// Cheapest and most expensive price, if there are any products
    pub price_bounds: Option<(Decimal, Decimal)>,
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            products: Vec::new(),
            currency,
        }
    }

    /// Create a catalog from a snapshot.
    ///
    /// # Errors
    ///
    /// See [`Catalog::refresh`].
    pub fn with_products(
        products: impl Into<Vec<Product>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(currency);

        catalog.refresh(products)?;

        Ok(catalog)
    }

    /// Replace the snapshot with a newer one. On error the previous snapshot is kept.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::CurrencyMismatch`]: a product is priced in another currency.
    /// - [`CatalogError::NegativePrice`]: a product has a negative price.
    /// - [`CatalogError::DuplicateProduct`]: two products share an id.
    pub fn refresh(&mut self, products: impl Into<Vec<Product>>) -> Result<(), CatalogError> {
        let products = products.into();
        let mut seen = FxHashSet::default();

        for product in &products {
            if product.currency != self.currency {
                return Err(CatalogError::CurrencyMismatch(
                    product.id.clone(),
                    product.currency.iso_alpha_code,
                    self.currency.iso_alpha_code,
                ));
            }

            if product.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(product.price));
            }

            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        self.products = products;

        Ok(())
    }

    /// Run the query pipeline over the current snapshot.
    #[must_use]
    pub fn query(&self, criteria: &FilterCriteria, sort: SortOption) -> Vec<&Product> {
        query(&self.products, criteria, sort)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id.as_str() == id)
    }

    /// Distinct categories and brands plus the price bounds of the snapshot.
    #[must_use]
    pub fn facets(&self) -> Facets {
        let mut categories = distinct(self.products.iter().map(|p| &p.category));
        let mut brands = distinct(self.products.iter().map(|p| &p.brand));

        categories.sort();
        brands.sort();

        let price_bounds = self
            .products
            .iter()
            .map(|p| p.price)
            .fold(None, |bounds, price| match bounds {
                None => Some((price, price)),
                Some((min, max)) => Some((min.min(price), max.max(price))),
            });

        Facets {
            categories,
            brands,
            price_bounds,
        }
    }

    /// Products in snapshot order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency all prices are expressed in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> SmallVec<[String; 8]> {
    let mut seen = FxHashSet::default();

    values
        .filter(|value| !value.is_empty())
        .filter(|value| seen.insert(*value))
        .cloned()
        .collect()
}
