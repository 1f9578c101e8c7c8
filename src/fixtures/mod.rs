//! Fixtures

use std::{fs, path::PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    fixtures::products::ProductsFixture,
    products::Product,
};

pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid rating
    #[error("Invalid rating, expected 1.0 to 5.0: {0}")]
    InvalidRating(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// The fixture lists no products, so its currency is unknown
    #[error("No products in fixture; currency unknown")]
    NoCurrency,

    /// The products do not form a valid catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Fixture {
    /// Create a fixture loader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load products from `products/{name}.yml`, in file order
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the products use more than
    /// one currency.
    pub fn load_products(&self, name: &str) -> Result<Vec<Product>, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        let mut products: Vec<Product> = Vec::with_capacity(fixture.products.len());

        for product_fixture in fixture.products {
            let product = Product::try_from(product_fixture)?;

            if let Some(first) = products.first()
                && first.currency != product.currency
            {
                return Err(FixtureError::CurrencyMismatch(
                    first.currency.iso_alpha_code.to_string(),
                    product.currency.iso_alpha_code.to_string(),
                ));
            }

            products.push(product);
        }

        debug!(fixture = name, products = products.len(), "loaded product fixture");

        Ok(products)
    }

    /// Load `products/{name}.yml` as a catalog snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the products cannot be loaded, the file is empty, or the products
    /// do not form a valid catalog (e.g. duplicate ids).
    pub fn load_catalog(&self, name: &str) -> Result<Catalog, FixtureError> {
        let products = self.load_products(name)?;
        let currency = products
            .first()
            .map(|product| product.currency)
            .ok_or(FixtureError::NoCurrency)?;

        Ok(Catalog::with_products(products, currency)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use rust_decimal::Decimal;
    use rusty_money::iso::GBP;
    use tempfile::tempdir;
    use testresult::TestResult;

    use crate::products::ProductId;

    use super::*;

    fn write_fixture(base: &Path, name: &str, contents: &str) -> TestResult {
        let dir = base.join("products");

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_loads_pharmacy_catalog() -> TestResult {
        let catalog = Fixture::new().load_catalog("pharmacy")?;

        assert!(!catalog.is_empty());
        assert_eq!(catalog.currency(), GBP);

        let gummies = catalog
            .products()
            .iter()
            .find(|product| product.name == "Vitamin C Boost Gummies")
            .ok_or("gummies missing from fixture")?;

        assert!(gummies.in_stock());

        Ok(())
    }

    #[test]
    fn fixture_keeps_file_order() -> TestResult {
        let dir = tempdir()?;

        write_fixture(
            dir.path(),
            "ordered",
            "products:\n  - id: b\n    name: B\n    price: 1.00 GBP\n  - id: a\n    name: A\n    price: 2.00 GBP\n",
        )?;

        let products = Fixture::with_base_path(dir.path()).load_products("ordered")?;
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(products.last().map(|p| p.price), Some(Decimal::new(200, 2)));

        Ok(())
    }

    #[test]
    fn fixture_rejects_currency_mismatch() -> TestResult {
        let dir = tempdir()?;

        write_fixture(
            dir.path(),
            "mixed",
            "products:\n  - id: a\n    name: A\n    price: 1.00 GBP\n  - id: b\n    name: B\n    price: 1.00 USD\n",
        )?;

        let result = Fixture::with_base_path(dir.path()).load_products("mixed");

        assert!(matches!(
            result,
            Err(FixtureError::CurrencyMismatch(expected, found)) if expected == "GBP" && found == "USD"
        ));

        Ok(())
    }

    #[test]
    fn fixture_rejects_duplicate_ids() -> TestResult {
        let dir = tempdir()?;

        write_fixture(
            dir.path(),
            "dupes",
            "products:\n  - id: a\n    name: A\n    price: 1.00 GBP\n  - id: a\n    name: Again\n    price: 1.00 GBP\n",
        )?;

        let result = Fixture::with_base_path(dir.path()).load_catalog("dupes");

        assert!(matches!(
            result,
            Err(FixtureError::Catalog(CatalogError::DuplicateProduct(id))) if id == ProductId::from("a")
        ));

        Ok(())
    }

    #[test]
    fn empty_fixture_has_no_currency() -> TestResult {
        let dir = tempdir()?;

        write_fixture(dir.path(), "empty", "products: []\n")?;

        let result = Fixture::with_base_path(dir.path()).load_catalog("empty");

        assert!(matches!(result, Err(FixtureError::NoCurrency)));

        Ok(())
    }

    #[test]
    fn missing_fixture_is_an_io_error() -> TestResult {
        let dir = tempdir()?;

        let result = Fixture::with_base_path(dir.path()).load_products("absent");

        assert!(matches!(result, Err(FixtureError::Io(_))));

        Ok(())
    }
}
