//! Product Fixtures

use std::str::FromStr;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{fixtures::FixtureError, pricing::currency_from_code, products::Product};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in display order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product identifier
    pub id: String,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product price (e.g., "4.99 GBP")
    pub price: String,

    /// Product category
    #[serde(default)]
    pub category: String,

    /// Product brand
    #[serde(default)]
    pub brand: String,

    /// Units in stock
    #[serde(default)]
    pub stock: u32,

    /// Whether the product is featured
    #[serde(default)]
    pub featured: bool,

    /// Average rating (e.g., "4.5")
    pub rating: Option<String>,

    /// Image location
    pub image_url: Option<String>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (price, currency) = parse_price(&fixture.price)?;

        let mut product = Product::new(fixture.id, fixture.name, price, currency)
            .with_description(fixture.description)
            .with_category(fixture.category)
            .with_brand(fixture.brand)
            .with_stock(fixture.stock)
            .with_featured(fixture.featured);

        if let Some(rating) = fixture.rating {
            product = product.with_rating(parse_rating(&rating)?);
        }

        if let Some(image_url) = fixture.image_url {
            product = product.with_image_url(image_url);
        }

        Ok(product)
    }
}

/// Parse price string (e.g., "2.99 GBP") into an amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount is
/// not a non-negative decimal, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = Decimal::from_str(amount)
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount < Decimal::ZERO {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let currency = currency_from_code(currency_code)
        .ok_or_else(|| FixtureError::UnknownCurrency((*currency_code).to_string()))?;

    Ok((amount, currency))
}

/// Parse a rating string (e.g., "4.5"), which must lie between 1.0 and 5.0
///
/// # Errors
///
/// Returns an error if the string is not a decimal or is out of range.
pub fn parse_rating(s: &str) -> Result<Decimal, FixtureError> {
    let rating =
        Decimal::from_str(s.trim()).map_err(|_err| FixtureError::InvalidRating(s.to_string()))?;

    if rating < Decimal::ONE || rating > Decimal::new(5, 0) {
        return Err(FixtureError::InvalidRating(s.to_string()));
    }

    Ok(rating)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{EUR, GBP, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_keeps_full_precision() -> TestResult {
        let (amount, currency) = parse_price("2.995 GBP")?;

        assert_eq!(amount, Decimal::new(2995, 3));
        assert_eq!(currency, GBP);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("2.99GBP");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_negative_amounts() {
        let result = parse_price("-1.00 GBP");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_accepts_usd_and_eur() -> TestResult {
        let (usd_amount, usd) = parse_price("1.00 USD")?;
        let (eur_amount, eur) = parse_price("2.50 EUR")?;

        assert_eq!(usd_amount, Decimal::ONE);
        assert_eq!(usd, USD);
        assert_eq!(eur_amount, Decimal::new(250, 2));
        assert_eq!(eur, EUR);

        Ok(())
    }

    #[test]
    fn parse_rating_accepts_bounds() -> TestResult {
        assert_eq!(parse_rating("1.0")?, Decimal::ONE);
        assert_eq!(parse_rating(" 5 ")?, Decimal::new(5, 0));

        Ok(())
    }

    #[test]
    fn parse_rating_rejects_out_of_range() {
        assert!(matches!(parse_rating("0.5"), Err(FixtureError::InvalidRating(_))));
        assert!(matches!(parse_rating("5.1"), Err(FixtureError::InvalidRating(_))));
        assert!(matches!(parse_rating("great"), Err(FixtureError::InvalidRating(_))));
    }

    #[test]
    fn fixture_converts_into_product() -> TestResult {
        let fixture: ProductFixture = serde_norway::from_str(
            "id: spf50\nname: Sun Cream SPF50\nprice: 10.50 GBP\nstock: 4\nrating: \"4.2\"\n",
        )?;

        let product = Product::try_from(fixture)?;

        assert_eq!(product.id.as_str(), "spf50");
        assert_eq!(product.price, Decimal::new(1050, 2));
        assert_eq!(product.stock, 4);
        assert_eq!(product.rating, Some(Decimal::new(42, 1)));
        assert!(!product.featured);
        assert!(product.description.is_empty());

        Ok(())
    }
}
