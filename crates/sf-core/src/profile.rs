//! The user profile store.
//!
//! State machine over the session: `LoggedOut` → `LoggedIn`, entered either
//! by finding a persisted token + user record at startup or by the external
//! auth-success signal at runtime. There is no logout transition — the
//! original design has none, and none is invented here.

use sf_storage::{keys, KeyValueStore};
use sf_types::{Language, Settings, Theme, ToggleSetting, Transaction, UserData};

use crate::error::StoreError;
use crate::views::{self, ProfilePanelView, ProfileView, TransactionView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    LoggedIn,
}

pub struct ProfileStore<S> {
    auth: AuthState,
    balance: f64,
    transactions: Vec<Transaction>,
    user_data: Option<UserData>,
    settings: Settings,
    store: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            auth: AuthState::LoggedOut,
            balance: 0.0,
            transactions: Vec::new(),
            user_data: None,
            settings: Settings::default(),
            store,
        }
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth == AuthState::LoggedIn
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn user_data(&self) -> Option<&UserData> {
        self.user_data.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Check for a persisted session. Both the token and the user record
    /// must be present to transition to `LoggedIn`; a successful transition
    /// triggers the secondary load of balance and transaction history.
    pub fn check_auth_status(&mut self) -> Result<(), StoreError> {
        let token = self.store.get(keys::AUTH_TOKEN);
        let raw_user = self.store.get(keys::USER_DATA);

        if let (Some(_token), Some(raw_user)) = (token, raw_user) {
            let user = serde_json::from_str::<UserData>(&raw_user)
                .map_err(|e| StoreError::corrupt(keys::USER_DATA, e))?;
            self.auth = AuthState::LoggedIn;
            self.user_data = Some(user);
            self.load_user_data()?;
        }
        Ok(())
    }

    /// Balance parses leniently (anything unparseable reads as zero, the
    /// `parseFloat(x) || 0` behavior the stored format grew up with);
    /// transactions default when absent but propagate when malformed.
    fn load_user_data(&mut self) -> Result<(), StoreError> {
        self.balance = self
            .store
            .get(keys::BALANCE)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .unwrap_or(0.0);

        self.transactions = match self.store.get(keys::TRANSACTIONS) {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| StoreError::corrupt(keys::TRANSACTIONS, e))?,
            None => Vec::new(),
        };
        Ok(())
    }

    /// Shallow-merge persisted settings onto the defaults. Absent record
    /// keeps the defaults untouched.
    pub fn load_settings(&mut self) -> Result<(), StoreError> {
        if let Some(raw) = self.store.get(keys::SETTINGS) {
            self.settings = serde_json::from_str(&raw)
                .map_err(|e| StoreError::corrupt(keys::SETTINGS, e))?;
        }
        Ok(())
    }

    /// React to the external auth-success signal: transition to `LoggedIn`
    /// and persist the token and user record exactly as given.
    pub fn handle_auth_success(&mut self, token: &str, user_data: UserData) {
        self.auth = AuthState::LoggedIn;
        self.store.set(keys::AUTH_TOKEN, token);
        self.persist_user_data(&user_data);
        self.user_data = Some(user_data);
    }

    /// Set the avatar on the user record and persist it. Creates the record
    /// when none exists yet (the auth flow may not have written one).
    pub fn set_avatar(&mut self, data_url: &str) {
        let mut user = self.user_data.take().unwrap_or_default();
        user.avatar = Some(data_url.to_owned());
        self.persist_user_data(&user);
        self.user_data = Some(user);
    }

    pub fn set_toggle(&mut self, toggle: ToggleSetting, value: bool) {
        self.settings.set_toggle(toggle, value);
        self.save_settings();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
        self.save_settings();
    }

    pub fn set_language(&mut self, language: Language) {
        self.settings.language = language;
        self.save_settings();
    }

    /// Persist the whole settings record. The theme/language side effects
    /// (body class, document `lang`, panel re-render) belong to the caller.
    pub fn save_settings(&self) {
        let json = serde_json::to_string(&self.settings).unwrap_or_else(|_| "{}".into());
        self.store.set(keys::SETTINGS, &json);
    }

    /// Prepend to the history (newest first) and persist the whole list.
    pub fn add_transaction(&mut self, tx: Transaction) {
        self.transactions.insert(0, tx);
        let json = serde_json::to_string(&self.transactions).unwrap_or_else(|_| "[]".into());
        self.store.set(keys::TRANSACTIONS, &json);
    }

    /// Overwrite the balance — no delta, no audit trail — and persist it as
    /// a bare numeric string.
    pub fn update_balance(&mut self, amount: f64) {
        self.balance = amount;
        self.store.set(keys::BALANCE, &amount.to_string());
    }

    /// Project current state into the panel view model.
    pub fn view(&self) -> ProfileView {
        match self.auth {
            AuthState::LoggedOut => ProfileView::LoggedOut,
            AuthState::LoggedIn => {
                let avatar = self
                    .user_data
                    .as_ref()
                    .and_then(|u| u.avatar.clone())
                    .unwrap_or_else(|| views::AVATAR_PLACEHOLDER.to_owned());
                ProfileView::LoggedIn(ProfilePanelView {
                    balance_display: views::balance_display(self.balance),
                    avatar,
                    transactions: self.transactions.iter().map(TransactionView::new).collect(),
                    settings: self.settings.clone(),
                })
            }
        }
    }

    fn persist_user_data(&self, user: &UserData) {
        let json = serde_json::to_string(user).unwrap_or_else(|_| "{}".into());
        self.store.set(keys::USER_DATA, &json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_storage::InMemoryStore;
    use sf_types::TxKind;

    fn seeded_session(store: &InMemoryStore) {
        store.set(keys::AUTH_TOKEN, "tok-123");
        store.set(keys::USER_DATA, r#"{"avatar":"me.png","username":"ivan"}"#);
    }

    #[test]
    fn starts_logged_out_with_defaults() {
        let profile = ProfileStore::new(InMemoryStore::new());
        assert!(!profile.is_logged_in());
        assert_eq!(profile.balance(), 0.0);
        assert_eq!(profile.settings(), &Settings::default());
        assert_eq!(profile.view(), ProfileView::LoggedOut);
    }

    #[test]
    fn persisted_session_logs_in_and_loads_history() {
        let store = InMemoryStore::new();
        seeded_session(&store);
        store.set(keys::BALANCE, "150");
        store.set(
            keys::TRANSACTIONS,
            r#"[{"type":"deposit","amount":50.0,"date":1}]"#,
        );

        let mut profile = ProfileStore::new(store);
        profile.check_auth_status().unwrap();

        assert!(profile.is_logged_in());
        assert_eq!(profile.balance(), 150.0);
        assert_eq!(profile.transactions().len(), 1);
        assert_eq!(
            profile.user_data().unwrap().avatar.as_deref(),
            Some("me.png")
        );
    }

    #[test]
    fn token_without_user_record_stays_logged_out() {
        let store = InMemoryStore::new();
        store.set(keys::AUTH_TOKEN, "tok-123");

        let mut profile = ProfileStore::new(store);
        profile.check_auth_status().unwrap();
        assert!(!profile.is_logged_in());
    }

    #[test]
    fn unparseable_balance_reads_as_zero() {
        let store = InMemoryStore::new();
        seeded_session(&store);
        store.set(keys::BALANCE, "not a number");

        let mut profile = ProfileStore::new(store);
        profile.check_auth_status().unwrap();
        assert_eq!(profile.balance(), 0.0);
    }

    #[test]
    fn malformed_transactions_propagate() {
        let store = InMemoryStore::new();
        seeded_session(&store);
        store.set(keys::TRANSACTIONS, "{broken");

        let mut profile = ProfileStore::new(store);
        let err = profile.check_auth_status().unwrap_err();
        assert_eq!(err.key(), keys::TRANSACTIONS);
    }

    #[test]
    fn malformed_user_record_propagates() {
        let store = InMemoryStore::new();
        store.set(keys::AUTH_TOKEN, "tok");
        store.set(keys::USER_DATA, "][");

        let mut profile = ProfileStore::new(store);
        assert!(profile.check_auth_status().is_err());
        assert!(!profile.is_logged_in());
    }

    #[test]
    fn auth_success_signal_logs_in_and_persists_verbatim() {
        let store = InMemoryStore::new();
        let mut profile = ProfileStore::new(store.clone());
        assert!(!profile.is_logged_in());

        let user: UserData =
            serde_json::from_str(r#"{"avatar":"tg.png","id":42}"#).unwrap();
        profile.handle_auth_success("token-abc", user.clone());

        assert!(profile.is_logged_in());
        assert_eq!(store.get(keys::AUTH_TOKEN).as_deref(), Some("token-abc"));
        let persisted: UserData =
            serde_json::from_str(&store.get(keys::USER_DATA).unwrap()).unwrap();
        assert_eq!(persisted, user);
    }

    #[test]
    fn changed_setting_persists_and_merges_back() {
        let store = InMemoryStore::new();
        let mut profile = ProfileStore::new(store.clone());
        profile.set_theme(Theme::Light);

        let mut reloaded = ProfileStore::new(store);
        reloaded.load_settings().unwrap();
        assert_eq!(reloaded.settings().theme, Theme::Light);
        // unspecified fields keep their defaults
        assert!(reloaded.settings().notifications);
        assert_eq!(reloaded.settings().language, Language::Ru);
    }

    #[test]
    fn toggles_persist_individually() {
        let store = InMemoryStore::new();
        let mut profile = ProfileStore::new(store.clone());
        profile.set_toggle(ToggleSetting::Privacy, true);
        profile.set_toggle(ToggleSetting::Notifications, false);

        let mut reloaded = ProfileStore::new(store);
        reloaded.load_settings().unwrap();
        assert!(reloaded.settings().privacy);
        assert!(!reloaded.settings().notifications);
        assert!(reloaded.settings().push_notifications);
    }

    #[test]
    fn malformed_settings_propagate() {
        let store = InMemoryStore::new();
        store.set(keys::SETTINGS, "no");
        let mut profile = ProfileStore::new(store);
        let err = profile.load_settings().unwrap_err();
        assert_eq!(err.key(), keys::SETTINGS);
    }

    #[test]
    fn transactions_are_newest_first() {
        let store = InMemoryStore::new();
        let mut profile = ProfileStore::new(store.clone());

        let tx1 = Transaction {
            kind: TxKind::Deposit,
            amount: 50.0,
            date: 1,
        };
        let tx2 = Transaction {
            kind: TxKind::Purchase,
            amount: -10.0,
            date: 2,
        };
        profile.add_transaction(tx1.clone());
        profile.add_transaction(tx2.clone());

        assert_eq!(profile.transactions(), &[tx2.clone(), tx1.clone()]);

        let persisted: Vec<Transaction> =
            serde_json::from_str(&store.get(keys::TRANSACTIONS).unwrap()).unwrap();
        assert_eq!(persisted, vec![tx2, tx1]);
    }

    #[test]
    fn update_balance_overwrites_and_persists() {
        let store = InMemoryStore::new();
        let mut profile = ProfileStore::new(store.clone());
        profile.update_balance(99.5);
        assert_eq!(profile.balance(), 99.5);
        assert_eq!(store.get(keys::BALANCE).as_deref(), Some("99.5"));
    }

    #[test]
    fn set_avatar_creates_the_record_when_missing() {
        let store = InMemoryStore::new();
        let mut profile = ProfileStore::new(store.clone());
        profile.set_avatar("data:image/png;base64,xyz");

        let persisted: UserData =
            serde_json::from_str(&store.get(keys::USER_DATA).unwrap()).unwrap();
        assert_eq!(
            persisted.avatar.as_deref(),
            Some("data:image/png;base64,xyz")
        );
    }

    #[test]
    fn set_avatar_keeps_extra_user_fields() {
        let store = InMemoryStore::new();
        seeded_session(&store);
        let mut profile = ProfileStore::new(store.clone());
        profile.check_auth_status().unwrap();

        profile.set_avatar("data:image/png;base64,new");
        let persisted: UserData =
            serde_json::from_str(&store.get(keys::USER_DATA).unwrap()).unwrap();
        assert_eq!(persisted.extra["username"], serde_json::json!("ivan"));
        assert_eq!(persisted.avatar.as_deref(), Some("data:image/png;base64,new"));
    }

    #[test]
    fn logged_in_view_carries_panel_data() {
        let store = InMemoryStore::new();
        seeded_session(&store);
        store.set(keys::BALANCE, "150");

        let mut profile = ProfileStore::new(store);
        profile.check_auth_status().unwrap();

        match profile.view() {
            ProfileView::LoggedIn(panel) => {
                assert_eq!(panel.balance_display, "150.00");
                assert_eq!(panel.avatar, "me.png");
            }
            ProfileView::LoggedOut => panic!("expected logged-in view"),
        }
    }

    #[test]
    fn logged_out_view_uses_the_placeholder_avatar() {
        let profile = ProfileStore::new(InMemoryStore::new());
        assert_eq!(profile.view().button_avatar(), views::AVATAR_PLACEHOLDER);
    }
}
