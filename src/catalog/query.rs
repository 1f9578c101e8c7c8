//! Catalog query pipeline

use crate::{
    catalog::{FilterCriteria, SortOption},
    products::Product,
};

/// Filter `products` by `criteria` and order the survivors by `sort`.
///
/// The input is left untouched. Products that compare equal under `sort` keep their input
/// order, so running the same query twice yields the same sequence.
pub fn query<'a>(
    products: &'a [Product],
    criteria: &FilterCriteria,
    sort: SortOption,
) -> Vec<&'a Product> {
    let filter = criteria.compile();

    let mut visible: Vec<&Product> = products
        .iter()
        .filter(|product| filter.matches(product))
        .collect();

    visible.sort_by(|a, b| sort.compare(a, b));

    visible
}
