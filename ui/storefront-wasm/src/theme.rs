//! Page-wide theme and language side effects.

use sf_types::{Language, Theme};

use crate::dom;

/// Set the body class to the theme name. The host stylesheet keys off it.
pub fn apply_theme(theme: Theme) {
    if let Some(body) = dom::document().body() {
        body.set_class_name(theme.class_name());
    }
}

/// Set the document `lang` attribute. The full panel re-render that a
/// language change also triggers is the caller's job.
pub fn apply_language(language: Language) {
    if let Some(root) = dom::document().document_element() {
        let _ = root.set_attribute("lang", language.tag());
    }
}
