//! The persistence port.
//!
//! Every store talks to durable storage through [`KeyValueStore`], a narrow
//! get/set interface over string slots. In the browser the implementation is
//! `localStorage`; tests use [`InMemoryStore`]. Writes are best-effort and
//! synchronous, matching `localStorage` semantics — a full or unavailable
//! backend drops the write silently.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Canonical storage key names. One record per key, read and written
/// independently, no transactional grouping.
pub mod keys {
    /// `{items, total}` — written by the cart store.
    pub const CART: &str = "cart";
    /// `Product[]` — seeded externally, read-only here.
    pub const PRODUCTS: &str = "products";
    /// Opaque token string — written by the external auth flow.
    pub const AUTH_TOKEN: &str = "authToken";
    /// User record — written by the profile store and the auth flow.
    pub const USER_DATA: &str = "userData";
    /// Numeric string — written by the profile store.
    pub const BALANCE: &str = "balance";
    /// `Transaction[]`, newest first — written by the profile store.
    pub const TRANSACTIONS: &str = "transactions";
    /// Settings record, partial payloads allowed.
    pub const SETTINGS: &str = "settings";
}

pub trait KeyValueStore {
    /// Read a slot. `None` means the slot was never written (or the backend
    /// is unavailable).
    fn get(&self, key: &str) -> Option<String>;

    /// Write a slot. Failures are swallowed.
    fn set(&self, key: &str, value: &str);
}

/// Shared-map fake for tests. Clones share the same underlying entries, so a
/// store that writes through one handle is visible through another — the same
/// aliasing real `localStorage` has across components.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.get(keys::CART), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = InMemoryStore::new();
        store.set(keys::BALANCE, "42.5");
        assert_eq!(store.get(keys::BALANCE).as_deref(), Some("42.5"));
    }

    #[test]
    fn clones_share_entries() {
        let store = InMemoryStore::new();
        let alias = store.clone();
        store.set(keys::AUTH_TOKEN, "tok");
        assert_eq!(alias.get(keys::AUTH_TOKEN).as_deref(), Some("tok"));
    }

    #[test]
    fn last_write_wins() {
        let store = InMemoryStore::new();
        store.set(keys::SETTINGS, "{}");
        store.set(keys::SETTINGS, r#"{"privacy":true}"#);
        assert_eq!(
            store.get(keys::SETTINGS).as_deref(),
            Some(r#"{"privacy":true}"#)
        );
    }
}
