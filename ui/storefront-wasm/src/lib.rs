//! Storefront widget WASM frontend.
//!
//! Wires the `sf-core` stores to the host page: `localStorage` persistence,
//! HTML-fragment rendering, DOM event listeners, and the external
//! auth-success message. Each concern lives in its own module.

pub mod auth;
pub mod dom;
pub mod events;
pub mod render;
pub mod storage;
pub mod theme;

use std::cell::RefCell;
use std::rc::Rc;

use sf_core::{CatalogStore, ProfileStore, StoreError};
use wasm_bindgen::prelude::*;

use crate::storage::LocalStorage;

/// Shared handle to the profile store; cloned into event closures instead of
/// living in a page-global singleton.
pub type ProfileHandle = Rc<RefCell<ProfileStore<LocalStorage>>>;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    if let Err(err) = init() {
        gloo_console::error!("error initializing application:", err.to_string());
    }
}

/// Page-load sequence: catalog first, then the profile panel.
fn init() -> Result<(), StoreError> {
    let storage = LocalStorage;

    // A corrupt cart record aborts construction and surfaces in the
    // top-level catch; a corrupt product list only degrades the catalog.
    let mut catalog = CatalogStore::new(storage)?;
    if let Err(err) = catalog.load_products() {
        gloo_console::error!("error loading products:", err.to_string());
    }
    render::render_catalog(catalog.products());

    let profile: ProfileHandle = Rc::new(RefCell::new(ProfileStore::new(storage)));
    init_profile(&profile);
    auth::bind_message_listener(&profile);

    Ok(())
}

/// Profile init catch-all: a failing step is logged and the panel stays in
/// whatever partial state resulted — later steps do not run.
fn init_profile(profile: &ProfileHandle) {
    if let Err(err) = try_init_profile(profile) {
        gloo_console::error!("error initializing profile:", err.to_string());
    }
}

fn try_init_profile(profile: &ProfileHandle) -> Result<(), StoreError> {
    {
        let mut p = profile.borrow_mut();
        p.check_auth_status()?;
        p.load_settings()?;
    }
    {
        let p = profile.borrow();
        theme::apply_theme(p.settings().theme);
        theme::apply_language(p.settings().language);
    }
    events::bind_static();
    render::update_ui(profile);
    Ok(())
}
