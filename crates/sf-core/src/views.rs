//! Pure data-to-view-model mapping.
//!
//! Everything here is plain string/number projection with no DOM or markup
//! dependency, so the rendering contract is testable without a browser. The
//! wasm boundary turns these view models into HTML fragments.

use sf_types::{Product, Settings, Transaction, TxKind};

/// Shown wherever no avatar has been uploaded yet.
pub const AVATAR_PLACEHOLDER: &str = "https://via.placeholder.com/100";

/// Escape text for embedding in HTML content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Discount label value: `round((1 - price/oldPrice) * 100)`.
pub fn discount_percent(old_price: f64, price: f64) -> i64 {
    ((1.0 - price / old_price) * 100.0).round() as i64
}

/// One product card. Name and description arrive pre-escaped; prices are
/// rendered with the same number formatting the page always showed (`100`,
/// not `100.0`).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCardView {
    pub name: String,
    pub description: String,
    pub image: String,
    pub price_display: String,
    pub old_price_display: Option<String>,
    pub discount_percent: Option<i64>,
}

impl ProductCardView {
    pub fn new(product: &Product) -> Self {
        Self {
            name: escape_html(&product.name),
            description: escape_html(&product.description),
            image: product.image.clone(),
            price_display: number_display(product.price),
            old_price_display: product.old_price.map(number_display),
            discount_percent: product
                .old_price
                .map(|old| discount_percent(old, product.price)),
        }
    }
}

/// One transaction row.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionView {
    pub kind: TxKind,
    /// Signed display amount, e.g. `+50` / `-10`.
    pub amount_display: String,
    pub positive: bool,
    pub date_ms: i64,
}

impl TransactionView {
    pub fn new(tx: &Transaction) -> Self {
        let positive = tx.amount > 0.0;
        let amount_display = if positive {
            format!("+{}", number_display(tx.amount))
        } else {
            number_display(tx.amount)
        };
        Self {
            kind: tx.kind,
            amount_display,
            positive,
            date_ms: tx.date,
        }
    }
}

/// What the profile panel should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileView {
    /// Login prompt with the external auth deep link.
    LoggedOut,
    LoggedIn(ProfilePanelView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePanelView {
    /// Two-decimal balance, e.g. `150.00`.
    pub balance_display: String,
    pub avatar: String,
    pub transactions: Vec<TransactionView>,
    pub settings: Settings,
}

impl ProfileView {
    /// Avatar for the profile button — shown in both states.
    pub fn button_avatar(&self) -> &str {
        match self {
            ProfileView::LoggedOut => AVATAR_PLACEHOLDER,
            ProfileView::LoggedIn(panel) => &panel.avatar,
        }
    }
}

pub fn balance_display(balance: f64) -> String {
    format!("{balance:.2}")
}

/// Format a number the way the page always did: integral values without a
/// fraction part, everything else as-is.
fn number_display(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
