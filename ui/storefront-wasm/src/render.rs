//! HTML-fragment rendering.
//!
//! Projects the core view models into markup and writes it into the host
//! page. Element ids, classes, and data-attributes are the rendering
//! contract with the page's stylesheet and are kept verbatim. All
//! user-controlled text arrives pre-escaped from `sf_core::views`.

use sf_core::views::{ProductCardView, ProfilePanelView, ProfileView, TransactionView};
use sf_types::{Language, Product, Settings, Theme, ToggleSetting, TxKind};
use wasm_bindgen::JsValue;

use crate::dom;
use crate::events;
use crate::ProfileHandle;

/// External chat destinations. Plain outbound links, no payload.
pub const BUY_LINK: &str = "https://t.me/Rolse_tg";
pub const LOGIN_LINK: &str = "https://t.me/RZgdzRU_Robot";

/// UI copy for one language. The catalog is rendered once at page load
/// before any profile settings exist, so its strings stay Russian like the
/// original page; the profile panel re-renders on language change and picks
/// its labels here.
pub struct Labels {
    pub login_title: &'static str,
    pub login_text: &'static str,
    pub login_button: &'static str,
    pub profile_title: &'static str,
    pub balance_title: &'static str,
    pub deposit: &'static str,
    pub min_deposit: &'static str,
    pub tab_history: &'static str,
    pub tab_settings: &'static str,
    pub empty_history: &'static str,
    pub tx_deposit: &'static str,
    pub tx_purchase: &'static str,
    pub avatar_change: &'static str,
    pub toggle_notifications: &'static str,
    pub toggle_two_factor: &'static str,
    pub toggle_privacy: &'static str,
    pub toggle_push: &'static str,
    pub language_title: &'static str,
    pub theme_title: &'static str,
    pub theme_dark: &'static str,
    pub theme_light: &'static str,
    pub theme_auto: &'static str,
    pub save_settings: &'static str,
    pub settings_saved: &'static str,
    pub date_locale: &'static str,
}

static RU: Labels = Labels {
    login_title: "Требуется авторизация",
    login_text: "Для доступа к профилю необходимо авторизоваться",
    login_button: "Войти через Telegram",
    profile_title: "Профиль",
    balance_title: "Баланс",
    deposit: "Пополнить",
    min_deposit: "Минимальная сумма: 1₽",
    tab_history: "История",
    tab_settings: "Настройки",
    empty_history: "История транзакций пуста",
    tx_deposit: "Пополнение",
    tx_purchase: "Покупка",
    avatar_change: "Изменить",
    toggle_notifications: "Уведомления",
    toggle_two_factor: "Двухфакторная аутентификация",
    toggle_privacy: "Приватность",
    toggle_push: "Push-уведомления",
    language_title: "Язык интерфейса",
    theme_title: "Тема интерфейса",
    theme_dark: "Тёмная",
    theme_light: "Светлая",
    theme_auto: "Системная",
    save_settings: "Сохранить изменения",
    settings_saved: "Настройки сохранены!",
    date_locale: "ru-RU",
};

static EN: Labels = Labels {
    login_title: "Authorization required",
    login_text: "Sign in to access your profile",
    login_button: "Sign in with Telegram",
    profile_title: "Profile",
    balance_title: "Balance",
    deposit: "Deposit",
    min_deposit: "Minimum amount: 1₽",
    tab_history: "History",
    tab_settings: "Settings",
    empty_history: "No transactions yet",
    tx_deposit: "Deposit",
    tx_purchase: "Purchase",
    avatar_change: "Change",
    toggle_notifications: "Notifications",
    toggle_two_factor: "Two-factor authentication",
    toggle_privacy: "Privacy",
    toggle_push: "Push notifications",
    language_title: "Interface language",
    theme_title: "Interface theme",
    theme_dark: "Dark",
    theme_light: "Light",
    theme_auto: "System",
    save_settings: "Save changes",
    settings_saved: "Settings saved!",
    date_locale: "en-US",
};

pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::Ru => &RU,
        Language::En => &EN,
    }
}

// ── Catalog ──

const STORE_TITLE: &str = "Активные проекты";
const BUY_LABEL: &str = "Купить";

/// Replace `#products-container` content with the product grid. Silent
/// no-op when the container is absent from the host page.
pub fn render_catalog(products: &[Product]) {
    let Some(container) = dom::by_id("products-container") else {
        return;
    };

    let cards: String = products
        .iter()
        .map(|p| product_card_html(&ProductCardView::new(p)))
        .collect();

    dom::set_inner_html(
        &container,
        &format!(
            r#"<h2 class="store-title">{STORE_TITLE}</h2>
<div class="products-grid">{cards}</div>"#
        ),
    );
}

fn product_card_html(card: &ProductCardView) -> String {
    let price_block = match (&card.old_price_display, card.discount_percent) {
        (Some(old), Some(discount)) => format!(
            r#"<span class="old-price">{old}₽</span>
          <span class="discount">-{discount}%</span>
          <span class="current-price">{price}₽</span>"#,
            price = card.price_display,
        ),
        _ => format!(
            r#"<span class="current-price">{}₽</span>"#,
            card.price_display
        ),
    };

    format!(
        r#"
      <div class="product-card" data-aos="fade-up">
        <img src="{image}" alt="{name}" loading="lazy">
        <h3>{name}</h3>
        <p>{description}</p>
        <div class="price">
          {price_block}
        </div>
        <a href="{BUY_LINK}" class="buy-button" target="_blank">{BUY_LABEL}</a>
      </div>
      "#,
        image = card.image,
        name = card.name,
        description = card.description,
    )
}

// ── Profile panel ──

/// Re-render the profile menu and button from current store state, then
/// re-wire the controls inside the replaced markup. Silent no-op when the
/// host page has no profile button or menu.
pub fn update_ui(profile: &ProfileHandle) {
    let Some(btn) = dom::by_id("profile-btn") else {
        return;
    };
    let Some(menu) = dom::by_id("profile-menu") else {
        return;
    };

    let (view, language) = {
        let p = profile.borrow();
        (p.view(), p.settings().language)
    };
    let labels = labels(language);

    match &view {
        ProfileView::LoggedOut => {
            dom::set_inner_html(&menu, &login_prompt_html(labels));
        }
        ProfileView::LoggedIn(panel) => {
            dom::set_inner_html(&menu, &profile_menu_html(panel, labels));
            events::wire_profile_controls(profile);
        }
    }

    dom::set_inner_html(
        &btn,
        &format!(r#"<img src="{}" alt="Profile">"#, view.button_avatar()),
    );
}

fn login_prompt_html(labels: &Labels) -> String {
    format!(
        r#"
      <div class="login-prompt">
        <h3>{title}</h3>
        <p>{text}</p>
        <a href="{LOGIN_LINK}" class="login-button telegram">
          {button}
        </a>
      </div>
    "#,
        title = labels.login_title,
        text = labels.login_text,
        button = labels.login_button,
    )
}

fn profile_menu_html(panel: &ProfilePanelView, labels: &Labels) -> String {
    format!(
        r#"
      <div class="profile-header">
        <h3>{title}</h3>
        <span class="close-menu">&times;</span>
      </div>
      <div class="profile-content">
        <div class="balance-section">
          <h4>{balance_title}</h4>
          <p class="balance">{balance}₽</p>
          <button class="deposit-btn">{deposit}</button>
          <p class="min-deposit">{min_deposit}</p>
        </div>
        <div class="profile-tab-buttons">
          <button class="tab-button active" data-tab="history">{tab_history}</button>
          <button class="tab-button" data-tab="settings">{tab_settings}</button>
        </div>
        <div class="profile-tab active" id="history-tab">
          <div class="transactions-list">
            {transactions}
          </div>
        </div>
        <div class="profile-tab" id="settings-tab">
          {settings_tab}
        </div>
      </div>
    "#,
        title = labels.profile_title,
        balance_title = labels.balance_title,
        balance = panel.balance_display,
        deposit = labels.deposit,
        min_deposit = labels.min_deposit,
        tab_history = labels.tab_history,
        tab_settings = labels.tab_settings,
        transactions = transactions_html(&panel.transactions, labels),
        settings_tab = settings_tab_html(&panel.settings, &panel.avatar, labels),
    )
}

fn transactions_html(transactions: &[TransactionView], labels: &Labels) -> String {
    if transactions.is_empty() {
        return format!("<p>{}</p>", labels.empty_history);
    }

    transactions
        .iter()
        .map(|tx| {
            let kind_label = match tx.kind {
                TxKind::Deposit => labels.tx_deposit,
                TxKind::Purchase => labels.tx_purchase,
            };
            let amount_class = if tx.positive { "positive" } else { "negative" };
            format!(
                r#"
      <div class="transaction-item">
        <div class="transaction-info">
          <div>{kind_label}</div>
          <div class="transaction-date">{date}</div>
        </div>
        <div class="transaction-amount {amount_class}">
          {amount}₽
        </div>
      </div>
    "#,
                date = locale_date(tx.date_ms, labels.date_locale),
                amount = tx.amount_display,
            )
        })
        .collect()
}

fn locale_date(epoch_ms: i64, locale: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(epoch_ms as f64));
    String::from(date.to_locale_date_string(locale, &JsValue::UNDEFINED))
}

fn settings_tab_html(settings: &Settings, avatar: &str, labels: &Labels) -> String {
    format!(
        r#"
      <div class="settings-group">
        <h4>{profile_title}</h4>
        <div class="avatar-upload">
          <img src="{avatar}" id="profile-avatar" alt="Profile">
          <label for="avatar-input" class="avatar-change">{avatar_change}</label>
          <input type="file" id="avatar-input" accept="image/*" hidden>
        </div>
      </div>
      {toggles}
      {selects}
      <button class="save-settings">{save}</button>
    "#,
        profile_title = labels.profile_title,
        avatar_change = labels.avatar_change,
        toggles = toggle_groups_html(settings, labels),
        selects = select_groups_html(settings, labels),
        save = labels.save_settings,
    )
}

fn toggle_groups_html(settings: &Settings, labels: &Labels) -> String {
    ToggleSetting::ALL
        .into_iter()
        .map(|toggle| {
            let label = match toggle {
                ToggleSetting::Notifications => labels.toggle_notifications,
                ToggleSetting::TwoFactorAuth => labels.toggle_two_factor,
                ToggleSetting::Privacy => labels.toggle_privacy,
                ToggleSetting::PushNotifications => labels.toggle_push,
            };
            let checked = if settings.toggle(toggle) { " checked" } else { "" };
            format!(
                r#"
      <div class="settings-group">
        <h4>{label}</h4>
        <label class="toggle-switch">
          <input type="checkbox" id="{name}-toggle"{checked}>
          <span class="toggle-slider"></span>
        </label>
      </div>
    "#,
                name = toggle.name(),
            )
        })
        .collect()
}

fn select_groups_html(settings: &Settings, labels: &Labels) -> String {
    let selected = |matches: bool| if matches { " selected" } else { "" };
    format!(
        r#"
      <div class="settings-group">
        <h4>{language_title}</h4>
        <select class="language-select">
          <option value="ru"{ru}>Русский</option>
          <option value="en"{en}>English</option>
        </select>
      </div>
      <div class="settings-group">
        <h4>{theme_title}</h4>
        <select class="theme-select">
          <option value="dark"{dark}>{theme_dark}</option>
          <option value="light"{light}>{theme_light}</option>
          <option value="auto"{auto}>{theme_auto}</option>
        </select>
      </div>
    "#,
        language_title = labels.language_title,
        ru = selected(settings.language == Language::Ru),
        en = selected(settings.language == Language::En),
        theme_title = labels.theme_title,
        dark = selected(settings.theme == Theme::Dark),
        light = selected(settings.theme == Theme::Light),
        auto = selected(settings.theme == Theme::Auto),
        theme_dark = labels.theme_dark,
        theme_light = labels.theme_light,
        theme_auto = labels.theme_auto,
    )
}
