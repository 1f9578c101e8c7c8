//! Cart Store
//!
//! Wraps a [`Cart`] with a version counter and change observers, so a UI can either poll the
//! version or register a callback to re-render.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use slotmap::{SlotMap, new_key_type};
use tracing::trace;

use crate::{
    cart::{AddOutcome, Cart, CartError, QuantityUpdate},
    products::{Product, ProductId},
};

new_key_type! {
    /// Handle returned by [`CartStore::subscribe`]
    pub struct SubscriptionKey;
}

/// A state change applied to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line was appended.
    ItemAdded {
        /// Product on the new line
        product_id: ProductId,
        /// Its quantity
        quantity: u32,
    },

    /// An existing line's quantity changed.
    QuantityChanged {
        /// Product on the line
        product_id: ProductId,
        /// The new quantity
        quantity: u32,
    },

    /// A line was removed.
    ItemRemoved {
        /// Product that was removed
        product_id: ProductId,
    },

    /// Every line was removed.
    Cleared,
}

type Observer = Box<dyn FnMut(&CartEvent, u64) + Send>;

/// Owns the cart for one browsing session.
pub struct CartStore {
    cart: Cart,
    version: u64,
    observers: SlotMap<SubscriptionKey, Observer>,
}

impl CartStore {
    /// Create a store holding an empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self::from_cart(Cart::new(currency))
    }

    /// Create a store around an existing cart.
    #[must_use]
    pub fn from_cart(cart: Cart) -> Self {
        Self {
            cart,
            version: 0,
            observers: SlotMap::with_key(),
        }
    }

    /// Register a callback invoked with each event and the version it produced.
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&CartEvent, u64) + Send + 'static,
    ) -> SubscriptionKey {
        self.observers.insert(Box::new(observer))
    }

    /// Remove a callback. Returns `false` if the key was already removed.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.observers.remove(key).is_some()
    }

    /// Add `quantity` units of a product. See [`Cart::add_item`].
    ///
    /// # Errors
    ///
    /// Propagates [`CartError`] from the cart; nothing is published on error.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<AddOutcome, CartError> {
        let outcome = self.cart.add_item(product, quantity)?;

        if outcome.is_new_line() {
            self.publish(CartEvent::ItemAdded {
                product_id: product.id.clone(),
                quantity: outcome.quantity,
            });
        } else if outcome.changed_quantity() {
            self.publish(CartEvent::QuantityChanged {
                product_id: product.id.clone(),
                quantity: outcome.quantity,
            });
        }

        Ok(outcome)
    }

    /// Add a single unit of a product.
    ///
    /// # Errors
    ///
    /// See [`CartStore::add_item`].
    pub fn add_one(&mut self, product: &Product) -> Result<AddOutcome, CartError> {
        self.add_item(product, 1)
    }

    /// Remove the line for a product. Returns `false` if there was none.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let removed = self.cart.remove_item(product_id);

        if removed {
            self.publish(CartEvent::ItemRemoved {
                product_id: product_id.clone(),
            });
        }

        removed
    }

    /// Set the quantity of a line. See [`Cart::update_quantity`].
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> QuantityUpdate {
        let update = self.cart.update_quantity(product_id, quantity);

        match update {
            QuantityUpdate::Removed => self.publish(CartEvent::ItemRemoved {
                product_id: product_id.clone(),
            }),
            QuantityUpdate::Set { from, to } if from != to => {
                self.publish(CartEvent::QuantityChanged {
                    product_id: product_id.clone(),
                    quantity: to,
                });
            }
            QuantityUpdate::Set { .. } | QuantityUpdate::Missing => {}
        }

        update
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        if self.cart.is_empty() {
            return;
        }

        self.cart.clear();
        self.publish(CartEvent::Cleared);
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Unrounded subtotal.
    ///
    /// # Errors
    ///
    /// See [`Cart::subtotal`].
    pub fn subtotal(&self) -> Result<Decimal, CartError> {
        self.cart.subtotal()
    }

    /// Read-only view of the cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Number of state-changing mutations applied so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    fn publish(&mut self, event: CartEvent) {
        self.version += 1;

        trace!(version = self.version, ?event, "cart changed");

        for observer in self.observers.values_mut() {
            observer(&event, self.version);
        }
    }
}

impl Debug for CartStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("version", &self.version)
            .field("observers", &self.observers.len())
            .finish()
    }
}
