//! # Screens
//!
//! The closed set of screens the wallet can show. Names round-trip through
//! their camelCase form (`"sendMoney"`), which is what config files and the
//! CLI use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::navigation::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScreenId {
    Welcome,
    Dashboard,
    Insights,
    Budget,
    SendMoney,
    PaymentSuccess,
    Transactions,
    TransactionDetail,
    Profile,
    BiometricAuth,
    SecuritySettings,
    Wallet,
    FundingSources,
}

/// Screens that require a biometric check before they are shown.
pub const SENSITIVE_SCREENS: [ScreenId; 3] =
    [ScreenId::SendMoney, ScreenId::Profile, ScreenId::Transactions];

/// Where the user lands when there is nothing better to go to.
pub const FALLBACK_SCREEN: ScreenId = ScreenId::Dashboard;

impl ScreenId {
    pub const ALL: [ScreenId; 13] = [
        ScreenId::Welcome,
        ScreenId::Dashboard,
        ScreenId::Insights,
        ScreenId::Budget,
        ScreenId::SendMoney,
        ScreenId::PaymentSuccess,
        ScreenId::Transactions,
        ScreenId::TransactionDetail,
        ScreenId::Profile,
        ScreenId::BiometricAuth,
        ScreenId::SecuritySettings,
        ScreenId::Wallet,
        ScreenId::FundingSources,
    ];

    pub fn is_sensitive(self) -> bool {
        SENSITIVE_SCREENS.contains(&self)
    }

    /// Identifier used in config, CLI flags and logs.
    pub fn name(self) -> &'static str {
        match self {
            ScreenId::Welcome => "welcome",
            ScreenId::Dashboard => "dashboard",
            ScreenId::Insights => "insights",
            ScreenId::Budget => "budget",
            ScreenId::SendMoney => "sendMoney",
            ScreenId::PaymentSuccess => "paymentSuccess",
            ScreenId::Transactions => "transactions",
            ScreenId::TransactionDetail => "transactionDetail",
            ScreenId::Profile => "profile",
            ScreenId::BiometricAuth => "biometricAuth",
            ScreenId::SecuritySettings => "securitySettings",
            ScreenId::Wallet => "wallet",
            ScreenId::FundingSources => "fundingSources",
        }
    }

    /// Header text shown above the screen body.
    pub fn title(self) -> &'static str {
        match self {
            ScreenId::Welcome => "Munir Fintech",
            ScreenId::Dashboard => "Dashboard",
            ScreenId::Insights => "Financial Insights",
            ScreenId::Budget => "Budget Management",
            ScreenId::SendMoney => "Send Money",
            ScreenId::PaymentSuccess => "Payment Successful",
            ScreenId::Transactions => "Transaction History",
            ScreenId::TransactionDetail => "Transaction Details",
            ScreenId::Profile => "Profile",
            ScreenId::BiometricAuth => "Authentication Required",
            ScreenId::SecuritySettings => "Security Settings",
            ScreenId::Wallet => "Wallet",
            ScreenId::FundingSources => "Funding Sources",
        }
    }

    /// Welcome and the auth gate are full-screen; everything else gets the
    /// title bar (with the session clock) and the tab strip.
    pub fn shows_chrome(self) -> bool {
        !matches!(self, ScreenId::Welcome | ScreenId::BiometricAuth)
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScreenId {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScreenId::ALL
            .into_iter()
            .find(|screen| screen.name() == s)
            .ok_or_else(|| NavigationError::UnknownScreen(s.to_string()))
    }
}
