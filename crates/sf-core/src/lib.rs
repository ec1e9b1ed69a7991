//! Storefront core: the three state containers and their view models.
//!
//! Each store owns one slice of the persistent key-value namespace and is
//! generic over the [`sf_storage::KeyValueStore`] port, so the whole crate
//! runs under plain `cargo test` with the in-memory fake. Rendering concerns
//! stay out: stores expose state and view models, the wasm boundary turns
//! them into markup.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod profile;
pub mod views;

pub use cart::CartStore;
pub use catalog::CatalogStore;
pub use error::StoreError;
pub use profile::{AuthState, ProfileStore};
