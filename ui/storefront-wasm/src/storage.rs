//! Browser `localStorage` behind the persistence port.

use sf_storage::KeyValueStore;

/// Zero-sized handle to the page's `localStorage`. Copies are free; every
/// copy aliases the same underlying storage, like the in-memory test fake.
#[derive(Clone, Copy, Default)]
pub struct LocalStorage;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(s) = storage() {
            let _ = s.set_item(key, value);
        }
    }
}
