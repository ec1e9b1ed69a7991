//! Shared data model for the storefront widget.
//!
//! Wire shapes match the records already persisted in the browser's
//! `localStorage` (camelCase field names, lowercase enum tags), so payloads
//! written by earlier versions of the page load unchanged.

use serde::{Deserialize, Serialize};

/// A purchasable product. Loaded from storage, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
    pub image: String,
}

/// Transaction direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Deposit,
    Purchase,
}

/// A balance history entry. `date` is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: f64,
    pub date: i64,
}

/// Interface theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    Auto,
}

impl Theme {
    /// The page-wide body class this theme maps to.
    pub fn class_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Auto => "auto",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            "auto" => Some(Theme::Auto),
            _ => None,
        }
    }
}

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ru,
    En,
}

impl Language {
    /// BCP 47 tag for the document `lang` attribute.
    pub fn tag(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "ru" => Some(Language::Ru),
            "en" => Some(Language::En),
            _ => None,
        }
    }
}

/// The fixed-shape settings record.
///
/// The container-level `default` gives shallow-merge load semantics: fields
/// missing from a persisted payload take their defaults, and fields that no
/// longer exist are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub notifications: bool,
    pub two_factor_auth: bool,
    pub theme: Theme,
    pub language: Language,
    pub privacy: bool,
    pub push_notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            two_factor_auth: false,
            theme: Theme::Dark,
            language: Language::Ru,
            privacy: false,
            push_notifications: true,
        }
    }
}

/// The four boolean settings exposed as toggle switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleSetting {
    Notifications,
    TwoFactorAuth,
    Privacy,
    PushNotifications,
}

impl ToggleSetting {
    pub const ALL: [ToggleSetting; 4] = [
        ToggleSetting::Notifications,
        ToggleSetting::TwoFactorAuth,
        ToggleSetting::Privacy,
        ToggleSetting::PushNotifications,
    ];

    /// Wire/DOM name of the toggle (`{name}-toggle` element ids).
    pub fn name(self) -> &'static str {
        match self {
            ToggleSetting::Notifications => "notifications",
            ToggleSetting::TwoFactorAuth => "twoFactorAuth",
            ToggleSetting::Privacy => "privacy",
            ToggleSetting::PushNotifications => "pushNotifications",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl Settings {
    pub fn toggle(&self, toggle: ToggleSetting) -> bool {
        match toggle {
            ToggleSetting::Notifications => self.notifications,
            ToggleSetting::TwoFactorAuth => self.two_factor_auth,
            ToggleSetting::Privacy => self.privacy,
            ToggleSetting::PushNotifications => self.push_notifications,
        }
    }

    pub fn set_toggle(&mut self, toggle: ToggleSetting, value: bool) {
        match toggle {
            ToggleSetting::Notifications => self.notifications = value,
            ToggleSetting::TwoFactorAuth => self.two_factor_auth = value,
            ToggleSetting::Privacy => self.privacy = value,
            ToggleSetting::PushNotifications => self.push_notifications = value,
        }
    }
}

/// The persisted user record. The auth flow may attach arbitrary extra
/// fields; they are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
