//! Dispensary prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        AddOutcome, Cart, CartError, CartEvent, CartLine, CartStore, QuantityUpdate, SharedCart,
        SubscriptionKey,
    },
    catalog::{Catalog, CatalogError, Facets, FilterCriteria, PriceRange, SortOption, query},
    checkout::{
        CheckoutError, OrderLine, OrderPlacer, OrderRequest, PlacementError, ShippingAddress,
        checkout,
    },
    fixtures::{Fixture, FixtureError},
    orders::{InMemoryOrderBook, Order, OrderError, OrderId, OrderStatus},
    pricing::{PricingError, to_money},
    products::{Product, ProductId},
    render::RenderError,
};
