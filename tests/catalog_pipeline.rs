//! Catalog query pipeline against the bundled pharmacy fixture.

use dispensary::{
    catalog::{Catalog, FilterCriteria, PriceRange, SortOption, query},
    fixtures::Fixture,
    products::Product,
};
use rust_decimal::Decimal;
use rusty_money::iso::GBP;
use testresult::TestResult;

fn pharmacy() -> Result<Catalog, dispensary::fixtures::FixtureError> {
    Fixture::new().load_catalog("pharmacy")
}

fn names<'a>(products: &[&'a Product]) -> Vec<&'a str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn search_is_a_case_insensitive_substring_match() -> TestResult {
    let catalog = pharmacy()?;

    for needle in ["vita", "VITA", "Boost Gum", "  gummies  "] {
        let result = catalog.query(&FilterCriteria::new().with_query(needle), SortOption::NameAsc);

        assert!(
            names(&result).contains(&"Vitamin C Boost Gummies"),
            "'{needle}' did not match"
        );
    }

    Ok(())
}

#[test]
fn search_also_matches_descriptions() -> TestResult {
    let catalog = pharmacy()?;

    let result = catalog.query(&FilterCriteria::new().with_query("antihistamine"), SortOption::default());

    assert_eq!(names(&result), vec!["Cetirizine Hayfever Relief"]);

    Ok(())
}

#[test]
fn empty_criteria_keep_every_product() -> TestResult {
    let catalog = pharmacy()?;

    let result = catalog.query(&FilterCriteria::new(), SortOption::default());

    assert_eq!(result.len(), catalog.len());

    for product in catalog.products() {
        assert!(result.iter().any(|p| p.id == product.id), "{} missing", product.id);
    }

    Ok(())
}

#[test]
fn category_and_brand_filters_are_exact() -> TestResult {
    let catalog = pharmacy()?;
    let criteria = FilterCriteria::new()
        .with_category("Pain Relief")
        .with_brand("Nurofen");

    let result = catalog.query(&criteria, SortOption::NameAsc);

    assert_eq!(
        names(&result),
        vec!["Ibuprofen 200mg Tablets", "Migraine Relief Tablets"]
    );

    let partial = catalog.query(&FilterCriteria::new().with_category("pain"), SortOption::NameAsc);

    assert!(partial.is_empty());

    Ok(())
}

#[test]
fn price_sorts_are_monotonic() -> TestResult {
    let catalog = pharmacy()?;

    let asc = catalog.query(&FilterCriteria::new(), SortOption::PriceAsc);
    let desc = catalog.query(&FilterCriteria::new(), SortOption::PriceDesc);

    assert!(asc.windows(2).all(|w| matches!(w, [a, b] if a.price <= b.price)));
    assert!(desc.windows(2).all(|w| matches!(w, [a, b] if a.price >= b.price)));

    Ok(())
}

#[test]
fn featured_first_lists_featured_products_by_name() -> TestResult {
    let catalog = pharmacy()?;

    let result = catalog.query(&FilterCriteria::new(), SortOption::FeaturedFirst);
    let featured: Vec<&str> = result
        .iter()
        .take_while(|p| p.featured)
        .map(|p| p.name.as_str())
        .collect();

    assert_eq!(
        featured,
        vec!["Ibuprofen 200mg Tablets", "Sun Cream SPF50", "Vitamin C Boost Gummies"]
    );
    assert!(result.iter().skip(featured.len()).all(|p| !p.featured));

    Ok(())
}

#[test]
fn price_range_bounds_are_inclusive() -> TestResult {
    let catalog = pharmacy()?;
    let range = PriceRange::new(Decimal::new(249, 2), Decimal::new(499, 2))?;

    let result = catalog.query(&FilterCriteria::new().with_price_range(range), SortOption::PriceAsc);

    assert_eq!(result.first().map(|p| p.price), Some(Decimal::new(249, 2)));
    assert_eq!(result.last().map(|p| p.price), Some(Decimal::new(499, 2)));

    Ok(())
}

#[test]
fn identical_queries_yield_identical_sequences() -> TestResult {
    let catalog = pharmacy()?;
    let criteria = FilterCriteria::new().with_query("a");

    for sort in SortOption::ALL {
        let first = catalog.query(&criteria, sort);
        let second = catalog.query(&criteria, sort);

        assert_eq!(first, second, "{sort} is not deterministic");
    }

    Ok(())
}

#[test]
fn filter_and_sort_example() -> TestResult {
    let products = [
        Product::new("p5", "Five", Decimal::new(5, 0), GBP),
        Product::new("p10", "Ten", Decimal::new(10, 0), GBP),
        Product::new("p15", "Fifteen", Decimal::new(15, 0), GBP),
    ];
    let criteria = FilterCriteria::new()
        .with_price_range(PriceRange::new(Decimal::new(8, 0), Decimal::new(12, 0))?);

    let result = query(&products, &criteria, SortOption::default());

    assert_eq!(names(&result), vec!["Ten"]);

    let unsorted = [
        Product::new("b", "B", Decimal::ONE, GBP),
        Product::new("a", "A", Decimal::ONE, GBP).with_featured(true),
    ];

    let sorted = query(&unsorted, &FilterCriteria::new(), SortOption::FeaturedFirst);

    assert_eq!(names(&sorted), vec!["A", "B"]);

    Ok(())
}

#[test]
fn facets_cover_the_fixture() -> TestResult {
    let facets = pharmacy()?.facets();

    assert!(facets.categories.iter().any(|c| c == "Vitamins"));
    assert!(facets.brands.iter().any(|b| b == "Holland & Barrett"));
    assert_eq!(
        facets.price_bounds,
        Some((Decimal::new(99, 2), Decimal::new(1050, 2)))
    );

    Ok(())
}
