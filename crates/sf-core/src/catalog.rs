//! The product catalog store.
//!
//! Owns the product list loaded from storage plus a [`CartStore`]. The cart
//! is deliberately not wired into the buy flow — the rendered "buy" control
//! is an outbound link to an external chat channel, so nothing in this store
//! mutates the cart.

use sf_storage::{keys, KeyValueStore};
use sf_types::Product;

use crate::cart::CartStore;
use crate::error::StoreError;

pub struct CatalogStore<S> {
    products: Vec<Product>,
    cart: CartStore<S>,
    store: S,
}

impl<S: KeyValueStore + Clone> CatalogStore<S> {
    /// Construct with an empty product list. The owned cart loads here, and
    /// a corrupt cart record propagates — only the product read below has a
    /// graceful fallback.
    pub fn new(store: S) -> Result<Self, StoreError> {
        let cart = CartStore::load(store.clone())?;
        Ok(Self {
            products: Vec::new(),
            cart,
            store,
        })
    }

    /// Read the persisted product list. An absent record yields an empty
    /// list; a malformed one leaves the list empty and returns the error so
    /// the caller can log it and keep going.
    pub fn load_products(&mut self) -> Result<(), StoreError> {
        self.products.clear();
        if let Some(raw) = self.store.get(keys::PRODUCTS) {
            self.products = serde_json::from_str(&raw)
                .map_err(|e| StoreError::corrupt(keys::PRODUCTS, e))?;
        }
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }
}
