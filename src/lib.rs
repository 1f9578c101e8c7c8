//! Dispensary
//!
//! Dispensary is the in-process core of a pharmacy storefront: a cart store with stock-aware
//! quantity rules, a catalog query pipeline for filtering and ordering products, and the
//! checkout hand-off that turns a cart into an order payload for an external order service.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod fixtures;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod render;
pub mod uuids;
