//! # Application State
//!
//! Core wallet state for Munir. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn AuthenticationProvider>  // biometric backend
//! ├── navigation: NavigationController   // current screen + gate
//! ├── engine: ConversionEngine           // rate table
//! ├── budget: Budget                     // limits + month's spend
//! ├── reference: ReferenceData           // contacts, transactions, ...
//! ├── balances: Vec<WalletBalance>       // mutable copy, debited by sends
//! ├── amount_input / currencies          // send form
//! ├── funding_source                     // account a send is paid from
//! ├── contact_tab                        // recent or favorite contacts
//! ├── auth_session: Option<AuthSession>  // only while on biometricAuth
//! ├── pending_transfer                   // only while a send is settling
//! ├── completed_transfer                 // last settled send
//! ├── handoff: Option<Handoff>           // payload for the next screen
//! └── toast: Option<Toast>               // one-shot notification
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::auth::{AuthMethod, AuthSession, AuthenticationProvider};
use crate::core::budget::Budget;
use crate::core::config::ResolvedConfig;
use crate::core::conversion::{
    ConversionEngine, ConversionError, ConversionResult, CurrencyCode, parse_amount,
};
use crate::core::navigation::{NavTicket, NavigationController};
use crate::core::reference::{
    Contact, ContactId, FundingSource, FundingSourceId, ReferenceData, ReferenceDataError,
    Transaction, TransactionId, WalletBalance,
};
use crate::core::screen::ScreenId;

/// Amount the send form starts with.
pub const DEFAULT_AMOUNT: &str = "100.00";

/// Typed payload handed to the screen a navigation is heading for.
/// Survives a detour through the biometric gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handoff {
    Contact(ContactId),
    Transaction(TransactionId),
    RepeatPayment { contact: ContactId, amount: Decimal },
}

/// Which contacts the dashboard offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactTab {
    #[default]
    Recent,
    Favorites,
}

impl ContactTab {
    pub fn label(self) -> &'static str {
        match self {
            ContactTab::Recent => "Recent",
            ContactTab::Favorites => "Favorites",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ContactTab::Recent => ContactTab::Favorites,
            ContactTab::Favorites => ContactTab::Recent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Bumped on every new toast so the presenter can restart its timer
    /// even when the text repeats.
    pub serial: u64,
    pub message: String,
    pub kind: ToastKind,
}

/// A send waiting out its confirmation delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransfer {
    pub amount: Decimal,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub converted: Decimal,
    pub recipient: Option<ContactId>,
    /// Debit against the active wallet, in the wallet's currency.
    pub debit: Decimal,
    pub wallet: CurrencyCode,
    pub funding_source: Option<FundingSourceId>,
    pub ticket: NavTicket,
}

pub struct App {
    pub provider: Arc<dyn AuthenticationProvider>,
    pub navigation: NavigationController,
    pub engine: ConversionEngine,
    pub budget: Budget,
    pub reference: ReferenceData,
    pub balances: Vec<WalletBalance>,
    pub amount_input: String,
    pub source_currency: CurrencyCode,
    pub recipient_currency: CurrencyCode,
    pub wallet_currency: CurrencyCode,
    pub funding_source: Option<FundingSourceId>,
    pub contact_tab: ContactTab,
    pub recipient: Option<ContactId>,
    pub selected_transaction: Option<TransactionId>,
    pub auth_method: AuthMethod,
    pub auth_session: Option<AuthSession>,
    pub pending_transfer: Option<PendingTransfer>,
    /// Last settled send, shown on the payment success screen.
    pub completed_transfer: Option<PendingTransfer>,
    pub handoff: Option<Handoff>,
    pub toast: Option<Toast>,
    pub toast_serial: u64,
    pub toast_duration: Duration,
    pub transfer_delay: Duration,
}

impl App {
    pub fn new(
        provider: Arc<dyn AuthenticationProvider>,
        reference: ReferenceData,
    ) -> Result<Self, ReferenceDataError> {
        Self::with_reference(provider, reference, &ResolvedConfig::default())
    }

    /// Build from resolved config, using the embedded reference data.
    pub fn from_config(
        provider: Arc<dyn AuthenticationProvider>,
        config: &ResolvedConfig,
    ) -> Result<Self, ReferenceDataError> {
        Self::with_reference(provider, ReferenceData::embedded()?, config)
    }

    pub fn with_reference(
        provider: Arc<dyn AuthenticationProvider>,
        reference: ReferenceData,
        config: &ResolvedConfig,
    ) -> Result<Self, ReferenceDataError> {
        let mut budget = reference.budget()?;
        for (category, amount) in &config.budget_overrides {
            budget.set_budget(category, *amount)?;
        }

        let navigation = NavigationController::new(config.biometric_gating, config.cancel_policy)
            .starting_at(config.start_screen);
        let balances = reference.wallet_balances.clone();
        let wallet_currency = balances
            .first()
            .map(|b| b.currency)
            .unwrap_or(CurrencyCode::USD);
        let funding_source = reference.default_funding_source().map(|s| s.id);
        let auth_session = (navigation.current() == ScreenId::BiometricAuth)
            .then(|| AuthSession::new(config.auth_method));

        Ok(Self {
            provider,
            navigation,
            engine: ConversionEngine::new(config.rates.clone()),
            budget,
            reference,
            balances,
            amount_input: DEFAULT_AMOUNT.to_string(),
            source_currency: config.source_currency,
            recipient_currency: config.recipient_currency,
            wallet_currency,
            funding_source,
            contact_tab: ContactTab::default(),
            recipient: None,
            selected_transaction: None,
            auth_method: config.auth_method,
            auth_session,
            pending_transfer: None,
            completed_transfer: None,
            handoff: None,
            toast: None,
            toast_serial: 0,
            toast_duration: config.toast_duration,
            transfer_delay: config.transfer_delay,
        })
    }

    pub fn current_screen(&self) -> ScreenId {
        self.navigation.current()
    }

    /// What the recipient gets for the amount currently typed in. `None`
    /// while the field is empty or unparseable.
    pub fn exchange_preview(&self) -> Option<ConversionResult> {
        let amount = parse_amount(&self.amount_input)?;
        self.engine
            .convert(amount, self.source_currency, self.recipient_currency)
            .ok()
    }

    pub fn balance(&self, currency: CurrencyCode) -> Option<Decimal> {
        self.balances
            .iter()
            .find(|b| b.currency == currency)
            .map(|b| b.balance)
    }

    pub fn wallet_balance(&self) -> Decimal {
        self.balance(self.wallet_currency).unwrap_or(Decimal::ZERO)
    }

    /// Every balance expressed in USD and summed.
    pub fn total_balance_usd(&self) -> Result<Decimal, ConversionError> {
        self.balances.iter().try_fold(Decimal::ZERO, |total, b| {
            total
                .checked_add(self.engine.to_usd(b.balance, b.currency)?)
                .ok_or(ConversionError::Overflow)
        })
    }

    /// Contacts listed under the current dashboard tab.
    pub fn visible_contacts(&self) -> Vec<&Contact> {
        match self.contact_tab {
            ContactTab::Recent => self.reference.recent_contacts().collect(),
            ContactTab::Favorites => self.reference.favorite_contacts().collect(),
        }
    }

    pub fn selected_funding_source(&self) -> Option<&FundingSource> {
        self.funding_source
            .and_then(|id| self.reference.funding_source(id))
    }

    pub fn recipient_contact(&self) -> Option<&Contact> {
        self.recipient.and_then(|id| self.reference.contact(id))
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.selected_transaction
            .and_then(|id| self.reference.transaction(id))
    }

    pub fn auth_in_progress(&self) -> bool {
        self.auth_session.as_ref().is_some_and(|s| s.in_progress)
    }

    pub fn transfer_in_flight(&self) -> bool {
        self.pending_transfer.is_some()
    }

    pub(crate) fn show_toast(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toast_serial += 1;
        self.toast = Some(Toast {
            serial: self.toast_serial,
            message: message.into(),
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.current_screen(), ScreenId::Welcome);
        assert_eq!(app.amount_input, DEFAULT_AMOUNT);
        assert_eq!(app.wallet_currency, CurrencyCode::USD);
        assert!(app.auth_session.is_none());
        assert!(app.toast.is_none());
        assert!(!app.transfer_in_flight());
        assert_eq!(app.contact_tab, ContactTab::Recent);
        assert_eq!(app.selected_funding_source().map(|s| s.id), Some(1));
    }

    #[test]
    fn test_visible_contacts_follow_tab() {
        let mut app = test_app();
        assert_eq!(app.visible_contacts().len(), 4);
        assert!(app.visible_contacts().iter().all(|c| c.recent));

        app.contact_tab = app.contact_tab.toggled();
        assert_eq!(app.contact_tab, ContactTab::Favorites);
        assert_eq!(app.visible_contacts().len(), 3);
        assert!(app.visible_contacts().iter().all(|c| c.favorite));
    }

    #[test]
    fn test_exchange_preview() {
        let mut app = test_app();
        app.recipient_currency = CurrencyCode::INR;
        let preview = app.exchange_preview().unwrap();
        assert_eq!(preview.converted_amount, Decimal::new(8312, 0));

        app.amount_input = String::new();
        assert!(app.exchange_preview().is_none());
        app.amount_input = ".".to_string();
        assert!(app.exchange_preview().is_none());
    }

    #[test]
    fn test_total_balance_in_usd() {
        let app = test_app();
        let total = app.total_balance_usd().unwrap().round_dp(2);
        // 2458.50 + 12500 / 83.12 + 350.75 / 0.92
        assert_eq!(total, Decimal::new(299013, 2));
    }

    #[test]
    fn test_starting_on_sensitive_screen_opens_auth_session() {
        let config = ResolvedConfig {
            start_screen: ScreenId::Profile,
            ..Default::default()
        };
        let app = App::from_config(crate::test_support::scripted_provider(Vec::new()), &config)
            .unwrap();
        assert_eq!(app.current_screen(), ScreenId::BiometricAuth);
        assert!(app.auth_session.is_some());
    }

    #[test]
    fn test_budget_override_unknown_category_is_an_error() {
        let config = ResolvedConfig {
            budget_overrides: vec![("travel".to_string(), Decimal::TEN)],
            ..Default::default()
        };
        assert!(
            App::from_config(crate::test_support::scripted_provider(Vec::new()), &config).is_err()
        );
    }
}
