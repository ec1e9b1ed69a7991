//! The shopping cart store.
//!
//! Holds an ordered list of added products and a running total. The total is
//! maintained incrementally on add/remove, never recomputed from the items,
//! so a persisted record edited out-of-band can desynchronize it — there is
//! no repair-on-load step.

use serde::{Deserialize, Serialize};
use sf_storage::{keys, KeyValueStore};
use sf_types::Product;

use crate::error::StoreError;

/// The persisted `cart` record shape.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CartRecord {
    #[serde(default)]
    pub items: Vec<Product>,
    #[serde(default)]
    pub total: f64,
}

#[derive(Debug)]
pub struct CartStore<S> {
    items: Vec<Product>,
    total: f64,
    store: S,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the persisted cart. An absent record yields an empty cart; a
    /// malformed one is an error for the caller to deal with.
    pub fn load(store: S) -> Result<Self, StoreError> {
        let record = match store.get(keys::CART) {
            Some(raw) => serde_json::from_str::<CartRecord>(&raw)
                .map_err(|e| StoreError::corrupt(keys::CART, e))?,
            None => CartRecord::default(),
        };
        Ok(Self {
            items: record.items,
            total: record.total,
            store,
        })
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Append a product (duplicates allowed) and persist.
    pub fn add(&mut self, product: Product) {
        self.total += product.price;
        self.items.push(product);
        self.save();
    }

    /// Remove the first item with a matching id and persist. Silently does
    /// nothing — no write either — when the id is absent.
    pub fn remove(&mut self, product_id: u64) {
        if let Some(index) = self.items.iter().position(|p| p.id == product_id) {
            let removed = self.items.remove(index);
            self.total -= removed.price;
            self.save();
        }
    }

    /// Reset to an empty cart and persist unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = 0.0;
        self.save();
    }

    fn save(&self) {
        let record = CartRecord {
            items: self.items.clone(),
            total: self.total,
        };
        let json = serde_json::to_string(&record)
            .unwrap_or_else(|_| r#"{"items":[],"total":0}"#.into());
        self.store.set(keys::CART, &json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_storage::InMemoryStore;

    fn product(id: u64, price: f64) -> Product {
        Product {
            id,
            name: format!("product {id}"),
            description: "desc".into(),
            price,
            old_price: None,
            image: "img.png".into(),
        }
    }

    fn sum(cart: &CartStore<InMemoryStore>) -> f64 {
        cart.items().iter().map(|p| p.price).sum()
    }

    #[test]
    fn fresh_load_is_empty_without_error() {
        let cart = CartStore::load(InMemoryStore::new()).unwrap();
        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn total_tracks_sum_across_mutations() {
        let mut cart = CartStore::load(InMemoryStore::new()).unwrap();

        cart.add(product(1, 100.0));
        assert_eq!(cart.total(), sum(&cart));

        cart.add(product(2, 49.5));
        cart.add(product(1, 100.0)); // duplicate id is allowed
        assert_eq!(cart.items().len(), 3);
        assert_eq!(cart.total(), sum(&cart));

        cart.remove(1);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.total(), sum(&cart));

        cart.remove(2);
        cart.remove(1);
        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), sum(&cart));
    }

    #[test]
    fn remove_takes_the_first_matching_index() {
        let mut cart = CartStore::load(InMemoryStore::new()).unwrap();
        cart.add(product(7, 10.0));
        cart.add(product(7, 20.0));

        cart.remove(7);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].price, 20.0);
        assert_eq!(cart.total(), 20.0);
    }

    #[test]
    fn remove_missing_id_is_a_silent_noop() {
        let store = InMemoryStore::new();
        let mut cart = CartStore::load(store.clone()).unwrap();
        cart.add(product(1, 100.0));
        let persisted = store.get(sf_storage::keys::CART);

        cart.remove(99);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total(), 100.0);
        // no-op does not persist either
        assert_eq!(store.get(sf_storage::keys::CART), persisted);
    }

    #[test]
    fn remove_on_empty_cart_changes_nothing() {
        let mut cart = CartStore::load(InMemoryStore::new()).unwrap();
        cart.remove(1);
        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn clear_then_load_round_trips_empty() {
        let store = InMemoryStore::new();
        let mut cart = CartStore::load(store.clone()).unwrap();
        cart.add(product(1, 100.0));
        cart.clear();

        let reloaded = CartStore::load(store).unwrap();
        assert!(reloaded.items().is_empty());
        assert_eq!(reloaded.total(), 0.0);
    }

    #[test]
    fn mutations_persist_immediately() {
        let store = InMemoryStore::new();
        let mut cart = CartStore::load(store.clone()).unwrap();
        cart.add(product(3, 15.0));

        let reloaded = CartStore::load(store).unwrap();
        assert_eq!(reloaded.items().len(), 1);
        assert_eq!(reloaded.total(), 15.0);
    }

    #[test]
    fn corrupt_record_propagates_as_error() {
        let store = InMemoryStore::new();
        store.set(sf_storage::keys::CART, "not json");
        let err = CartStore::load(store).unwrap_err();
        assert_eq!(err.key(), sf_storage::keys::CART);
    }

    #[test]
    fn partial_record_fields_default() {
        let store = InMemoryStore::new();
        store.set(sf_storage::keys::CART, r#"{"total":12.0}"#);
        let cart = CartStore::load(store).unwrap();
        assert!(cart.items().is_empty());
        // the stored total is trusted as-is, not recomputed
        assert_eq!(cart.total(), 12.0);
    }
}
