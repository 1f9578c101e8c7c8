//! Catalog ordering

use std::{
    cmp::Ordering,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::{catalog::CatalogError, products::Product};

/// Ordering applied to a filtered product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOption {
    /// Featured products first, then by name.
    #[default]
    FeaturedFirst,

    /// Cheapest first.
    PriceAsc,

    /// Most expensive first.
    PriceDesc,

    /// Name A-Z.
    NameAsc,

    /// Name Z-A.
    NameDesc,
}

impl SortOption {
    /// Every option, in the order a sort menu lists them.
    pub const ALL: [SortOption; 5] = [
        SortOption::FeaturedFirst,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
        SortOption::NameDesc,
    ];

    /// Machine-readable key, accepted by [`SortOption::from_str`].
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            SortOption::FeaturedFirst => "featured",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
        }
    }

    /// Human-readable label for a sort menu.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SortOption::FeaturedFirst => "Featured",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::NameDesc => "Name: Z-A",
        }
    }

    /// Compare two products. Equal products keep their input order under a stable sort.
    #[must_use]
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::FeaturedFirst => b
                .featured
                .cmp(&a.featured)
                .then_with(|| a.name.cmp(&b.name)),
            SortOption::PriceAsc => a.price.cmp(&b.price),
            SortOption::PriceDesc => b.price.cmp(&a.price),
            SortOption::NameAsc => a.name.cmp(&b.name),
            SortOption::NameDesc => b.name.cmp(&a.name),
        }
    }
}

impl Display for SortOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.key())
    }
}

impl FromStr for SortOption {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.key() == s)
            .ok_or_else(|| CatalogError::UnknownSortOption(s.to_string()))
    }
}
