//! Event wiring.
//!
//! `bind_static` attaches the listeners that live for the whole page; the
//! profile panel's own controls sit inside markup that `update_ui` replaces
//! wholesale, so they are re-wired after every render. Closures are leaked
//! with `forget()` — they must outlive this call, and the page owns them
//! until unload.

use sf_types::{Language, Theme, ToggleSetting};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{FileReader, HtmlInputElement, HtmlSelectElement};

use crate::dom;
use crate::render;
use crate::theme;
use crate::ProfileHandle;

/// Helper: attach a click handler to an element. The element expression is
/// evaluated before the closure so call sites can move their own clone of
/// it into the handler.
macro_rules! on_click {
    ($el:expr, $cb:expr) => {{
        let el = $el;
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::MouseEvent)>);
        el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Helper: attach a change handler.
macro_rules! on_change {
    ($el:expr, $cb:expr) => {{
        let el = $el;
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::Event)>);
        el.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Listeners that are bound once at init: the profile button toggles the
/// menu, a click anywhere else closes it. Silent no-op when the host page
/// lacks either element.
pub fn bind_static() {
    let Some(btn) = dom::by_id("profile-btn") else {
        return;
    };
    let Some(menu) = dom::by_id("profile-menu") else {
        return;
    };

    {
        let menu = menu.clone();
        on_click!(&btn, move |e: web_sys::MouseEvent| {
            e.stop_propagation();
            dom::toggle_class(&menu, "active");
        });
    }

    {
        let btn = btn.clone();
        let cb = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
            let target = e.target();
            let target_node = target.as_ref().and_then(|t| t.dyn_ref::<web_sys::Node>());
            let inside_menu = menu.contains(target_node);
            let on_button = target.as_ref().and_then(|t| t.dyn_ref::<web_sys::Element>())
                == Some(&btn);
            if !inside_menu && !on_button {
                dom::remove_class(&menu, "active");
            }
        }) as Box<dyn FnMut(_)>);
        dom::document()
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
}

/// Wire the controls inside freshly rendered panel markup: tabs, avatar
/// upload, setting toggles, language/theme selects, save button.
pub fn wire_profile_controls(profile: &ProfileHandle) {
    wire_tab_buttons();
    wire_avatar_upload(profile);
    wire_setting_toggles(profile);
    wire_setting_selects(profile);
    wire_save_button(profile);
}

fn wire_tab_buttons() {
    for button in dom::query_all(".tab-button") {
        let tab_name = button.get_attribute("data-tab").unwrap_or_default();
        on_click!(button, move |_: web_sys::MouseEvent| {
            switch_tab(&tab_name);
        });
    }
}

/// Deactivate every tab panel and button, then activate the pair matching
/// `name`. An unknown name deactivates everything and activates nothing.
pub fn switch_tab(name: &str) {
    for el in dom::query_all(".profile-tab, .tab-button") {
        dom::remove_class(&el, "active");
    }
    if let Some(panel) = dom::by_id(&format!("{name}-tab")) {
        dom::add_class(&panel, "active");
    }
    if let Some(button) = dom::query(&format!(r#"[data-tab="{name}"]"#)) {
        dom::add_class(&button, "active");
    }
}

fn wire_avatar_upload(profile: &ProfileHandle) {
    let Some(input) = dom::by_id_typed::<HtmlInputElement>("avatar-input") else {
        return;
    };

    let profile = profile.clone();
    on_change!(input.clone(), move |_: web_sys::Event| {
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        read_avatar_file(&profile, &file);
    });
}

/// Read the picked file as a data URL; on completion update every on-page
/// avatar image and persist the user record. No type or size validation
/// beyond the file picker's `accept` hint.
fn read_avatar_file(profile: &ProfileHandle, file: &web_sys::File) {
    let Ok(reader) = FileReader::new() else {
        return;
    };

    let profile = profile.clone();
    let onload = {
        let reader = reader.clone();
        Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
            let Some(data_url) = reader.result().ok().and_then(|v| v.as_string()) else {
                return;
            };
            for img in dom::query_all("#profile-avatar, #profile-btn img") {
                let _ = img.set_attribute("src", &data_url);
            }
            profile.borrow_mut().set_avatar(&data_url);
        }) as Box<dyn FnMut(_)>)
    };
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    let _ = reader.read_as_data_url(file);
}

fn wire_setting_toggles(profile: &ProfileHandle) {
    for toggle in ToggleSetting::ALL {
        let Some(input) =
            dom::by_id_typed::<HtmlInputElement>(&format!("{}-toggle", toggle.name()))
        else {
            continue;
        };

        let profile = profile.clone();
        on_change!(input.clone(), move |_: web_sys::Event| {
            profile.borrow_mut().set_toggle(toggle, input.checked());
            after_settings_change(&profile);
        });
    }
}

fn wire_setting_selects(profile: &ProfileHandle) {
    if let Some(select) = select_by_class("language-select") {
        let profile = profile.clone();
        on_change!(select.clone(), move |_: web_sys::Event| {
            let Some(language) = Language::from_value(&select.value()) else {
                return;
            };
            profile.borrow_mut().set_language(language);
            after_settings_change(&profile);
        });
    }

    if let Some(select) = select_by_class("theme-select") {
        let profile = profile.clone();
        on_change!(select.clone(), move |_: web_sys::Event| {
            let Some(theme) = Theme::from_value(&select.value()) else {
                return;
            };
            profile.borrow_mut().set_theme(theme);
            after_settings_change(&profile);
        });
    }
}

fn wire_save_button(profile: &ProfileHandle) {
    let Some(button) = dom::query(".save-settings") else {
        return;
    };

    let profile = profile.clone();
    on_click!(button, move |_: web_sys::MouseEvent| {
        profile.borrow().save_settings();
        after_settings_change(&profile);

        // The one explicit user-facing confirmation in the whole widget.
        let language = profile.borrow().settings().language;
        let _ = dom::window().alert_with_message(render::labels(language).settings_saved);
    });
}

fn select_by_class(class: &str) -> Option<HtmlSelectElement> {
    dom::query(&format!(".{class}"))
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
}

/// Every settings mutation persists and then immediately re-applies the
/// page-wide side effects and re-renders the panel (which re-wires these
/// controls inside the fresh markup).
fn after_settings_change(profile: &ProfileHandle) {
    let (theme, language) = {
        let p = profile.borrow();
        (p.settings().theme, p.settings().language)
    };
    theme::apply_theme(theme);
    theme::apply_language(language);
    render::update_ui(profile);
}
