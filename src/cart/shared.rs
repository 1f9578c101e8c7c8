//! Shared Cart

use std::sync::{Arc, Mutex};

use rusty_money::iso::Currency;

use crate::{
    cart::{AddOutcome, Cart, CartError, CartStore},
    products::Product,
};

/// A [`CartStore`] behind a single mutex, for hosts that touch the cart from several threads.
///
/// Each operation holds the lock for its whole duration, so concurrent adds of the same
/// product still end up on one line.
#[derive(Debug, Clone)]
pub struct SharedCart {
    inner: Arc<Mutex<CartStore>>,
}

impl SharedCart {
    /// Create a shared store holding an empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self::from_store(CartStore::new(currency))
    }

    /// Share an existing store.
    #[must_use]
    pub fn from_store(store: CartStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Poisoned`] if a previous holder panicked.
    pub fn with<R>(&self, f: impl FnOnce(&mut CartStore) -> R) -> Result<R, CartError> {
        let mut store = self.inner.lock().map_err(|_poisoned| CartError::Poisoned)?;

        Ok(f(&mut store))
    }

    /// Add `quantity` units of a product.
    ///
    /// # Errors
    ///
    /// See [`CartStore::add_item`] and [`SharedCart::with`].
    pub fn add_item(&self, product: &Product, quantity: u32) -> Result<AddOutcome, CartError> {
        self.with(|store| store.add_item(product, quantity))?
    }

    /// Total units across all lines.
    ///
    /// # Errors
    ///
    /// See [`SharedCart::with`].
    pub fn item_count(&self) -> Result<u64, CartError> {
        self.with(|store| store.item_count())
    }

    /// Copy of the current cart.
    ///
    /// # Errors
    ///
    /// See [`SharedCart::with`].
    pub fn snapshot(&self) -> Result<Cart, CartError> {
        self.with(|store| store.cart().clone())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use rust_decimal::Decimal;
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn concurrent_adds_keep_one_line_per_product() -> TestResult {
        let cart = SharedCart::new(GBP);
        let product = Product::new("zinc", "Zinc", Decimal::new(399, 2), GBP).with_stock(100);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cart = cart.clone();
                let product = product.clone();

                thread::spawn(move || {
                    for _ in 0..5 {
                        cart.add_item(&product, 1)?;
                    }

                    Ok::<(), CartError>(())
                })
            })
            .collect();

        for handle in handles {
            handle.join().map_err(|_panic| "worker panicked")??;
        }

        let snapshot = cart.snapshot()?;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(cart.item_count()?, 40);

        Ok(())
    }

    #[test]
    fn with_exposes_the_store() -> TestResult {
        let cart = SharedCart::new(GBP);

        let version = cart.with(|store| store.version())?;

        assert_eq!(version, 0);

        Ok(())
    }
}
