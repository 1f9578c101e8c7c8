//! Catalog filters

use rust_decimal::Decimal;

use crate::{catalog::CatalogError, products::Product};

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: Decimal,
    max: Decimal,
}

impl PriceRange {
    /// Create a range covering `min..=max`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NegativePrice`]: either bound is below zero.
    /// - [`CatalogError::InvertedPriceRange`]: `min` is greater than `max`.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, CatalogError> {
        if min < Decimal::ZERO {
            return Err(CatalogError::NegativePrice(min));
        }

        if max < Decimal::ZERO {
            return Err(CatalogError::NegativePrice(max));
        }

        if min > max {
            return Err(CatalogError::InvertedPriceRange { min, max });
        }

        Ok(Self { min, max })
    }

    /// A range that admits every price.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::MAX,
        }
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> Decimal {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> Decimal {
        self.max
    }

    /// Whether `price` lies within the bounds.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// User-chosen constraints on the visible products. Empty strings mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Exact category to keep
    pub category: String,

    /// Exact brand to keep
    pub brand: String,

    /// Inclusive price bounds
    pub price_range: PriceRange,

    /// Free text searched in names and descriptions
    pub query: String,
}

impl FilterCriteria {
    /// Criteria that keep every product.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the given category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Keep only the given brand.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Keep only prices within `range`.
    #[must_use]
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    /// Keep only products whose name or description contains `query`.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Prepare the criteria for matching many products.
    pub(crate) fn compile(&self) -> CompiledFilter<'_> {
        let query = self.query.trim();

        CompiledFilter {
            criteria: self,
            needle: (!query.is_empty()).then(|| query.to_lowercase()),
        }
    }
}

/// Criteria with the search text lowercased once up front.
#[derive(Debug)]
pub(crate) struct CompiledFilter<'a> {
    criteria: &'a FilterCriteria,
    needle: Option<String>,
}

impl CompiledFilter<'_> {
    pub(crate) fn matches(&self, product: &Product) -> bool {
        self.matches_query(product)
            && (self.criteria.category.is_empty() || self.criteria.category == product.category)
            && (self.criteria.brand.is_empty() || self.criteria.brand == product.brand)
            && self.criteria.price_range.contains(product.price)
    }

    fn matches_query(&self, product: &Product) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };

        product.name.to_lowercase().contains(needle)
            || product.description.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    fn gummies() -> Product {
        Product::new(
            "vit-c-gummies",
            "Vitamin C Boost Gummies",
            Decimal::new(799, 2),
            GBP,
        )
        .with_description("Orange flavoured chewable supplement")
        .with_category("Vitamins")
        .with_brand("Nature's Best")
    }

    #[test]
    fn price_range_is_inclusive() -> TestResult {
        let range = PriceRange::new(Decimal::new(8, 0), Decimal::new(12, 0))?;

        assert!(range.contains(Decimal::new(8, 0)));
        assert!(range.contains(Decimal::new(12, 0)));
        assert!(!range.contains(Decimal::new(1201, 2)));

        Ok(())
    }

    #[test]
    fn price_range_rejects_inverted_bounds() {
        let result = PriceRange::new(Decimal::new(12, 0), Decimal::new(8, 0));

        assert!(matches!(result, Err(CatalogError::InvertedPriceRange { .. })));
    }

    #[test]
    fn price_range_rejects_negative_bounds() {
        let result = PriceRange::new(Decimal::new(-1, 0), Decimal::new(8, 0));

        assert!(matches!(result, Err(CatalogError::NegativePrice(_))));
    }

    #[test]
    fn empty_criteria_match_everything() {
        assert!(FilterCriteria::new().compile().matches(&gummies()));
    }

    #[test]
    fn query_matches_name_case_insensitively() {
        let criteria = FilterCriteria::new().with_query("vita");

        assert!(criteria.compile().matches(&gummies()));
    }

    #[test]
    fn query_matches_description() {
        let criteria = FilterCriteria::new().with_query("CHEWABLE");

        assert!(criteria.compile().matches(&gummies()));
    }

    #[test]
    fn query_matches_non_ascii_text() {
        let product = gummies().with_description("Échinacée et vitamine C");
        let criteria = FilterCriteria::new().with_query("échinacée");

        assert!(criteria.compile().matches(&product));
    }

    #[test]
    fn whitespace_query_counts_as_empty() {
        let criteria = FilterCriteria::new().with_query("   ");

        assert!(criteria.compile().matches(&gummies()));
    }

    #[test]
    fn category_and_brand_match_exactly() {
        let product = gummies();

        assert!(
            FilterCriteria::new()
                .with_category("Vitamins")
                .compile()
                .matches(&product)
        );
        assert!(
            !FilterCriteria::new()
                .with_category("vitamins")
                .compile()
                .matches(&product)
        );
        assert!(
            !FilterCriteria::new()
                .with_brand("Nature")
                .compile()
                .matches(&product)
        );
    }
}
