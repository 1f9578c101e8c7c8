use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use dispensary::{
    catalog::{Catalog, FilterCriteria, PriceRange, SortOption},
    pricing::to_money,
    render,
};
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub(crate) struct CatalogArgs {
    /// Only show this category
    #[arg(long)]
    category: Option<String>,

    /// Only show this brand
    #[arg(long)]
    brand: Option<String>,

    /// Search names and descriptions
    #[arg(short, long)]
    query: Option<String>,

    /// Lowest price to include
    #[arg(long)]
    min: Option<Decimal>,

    /// Highest price to include
    #[arg(long)]
    max: Option<Decimal>,

    /// Ordering: featured, price-asc, price-desc, name-asc, name-desc
    #[arg(short, long, default_value_t = SortOption::default())]
    sort: SortOption,

    /// Also list the available categories, brands and price bounds
    #[arg(long)]
    facets: bool,
}

impl CatalogArgs {
    fn criteria(&self) -> Result<FilterCriteria> {
        let range = PriceRange::new(
            self.min.unwrap_or(Decimal::ZERO),
            self.max.unwrap_or(Decimal::MAX),
        )?;

        Ok(FilterCriteria::new()
            .with_category(self.category.clone().unwrap_or_default())
            .with_brand(self.brand.clone().unwrap_or_default())
            .with_query(self.query.clone().unwrap_or_default())
            .with_price_range(range))
    }
}

pub(crate) fn run(catalog: &Catalog, args: &CatalogArgs) -> Result<()> {
    let products = catalog.query(&args.criteria()?, args.sort);
    let mut out = io::stdout().lock();

    writeln!(out, " Sorted by {}", args.sort.label())?;

    render::write_catalog(&mut out, &products, catalog.currency())?;

    if args.facets {
        let facets = catalog.facets();

        writeln!(out, " Categories: {}", facets.categories.join(", "))?;
        writeln!(out, " Brands:     {}", facets.brands.join(", "))?;

        if let Some((min, max)) = facets.price_bounds {
            writeln!(
                out,
                " Prices:     {} to {}",
                to_money(min, catalog.currency())?,
                to_money(max, catalog.currency())?
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: CatalogArgs,
    }

    #[test]
    fn flags_build_filter_criteria() -> TestResult {
        let harness = Harness::try_parse_from([
            "catalog", "--category", "Vitamins", "--min", "2", "--max", "8.50", "--sort",
            "price-desc",
        ])?;

        let criteria = harness.args.criteria()?;

        assert_eq!(criteria.category, "Vitamins");
        assert!(criteria.brand.is_empty());
        assert_eq!(criteria.price_range.max(), Decimal::new(850, 2));
        assert_eq!(harness.args.sort, SortOption::PriceDesc);

        Ok(())
    }

    #[test]
    fn inverted_range_is_an_error() -> TestResult {
        let harness = Harness::try_parse_from(["catalog", "--min", "9", "--max", "1"])?;

        assert!(harness.args.criteria().is_err());

        Ok(())
    }

    #[test]
    fn unknown_sort_key_is_rejected_by_the_parser() {
        assert!(Harness::try_parse_from(["catalog", "--sort", "rating"]).is_err());
    }
}
