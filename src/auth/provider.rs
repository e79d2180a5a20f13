use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Which biometric the user is asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    #[default]
    Fingerprint,
    Face,
}

impl AuthMethod {
    pub fn toggled(self) -> Self {
        match self {
            AuthMethod::Fingerprint => AuthMethod::Face,
            AuthMethod::Face => AuthMethod::Fingerprint,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuthMethod::Fingerprint => "Fingerprint",
            AuthMethod::Face => "Face ID",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthMethod::Fingerprint => "fingerprint",
            AuthMethod::Face => "face",
        })
    }
}

impl FromStr for AuthMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fingerprint" => Ok(AuthMethod::Fingerprint),
            "face" => Ok(AuthMethod::Face),
            other => Err(format!("unknown auth method: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Succeeded,
    Declined,
}

impl AuthOutcome {
    pub fn succeeded(self) -> bool {
        matches!(self, AuthOutcome::Succeeded)
    }
}

/// Lives only while the biometric gate is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthSession {
    pub in_progress: bool,
    pub method: AuthMethod,
}

impl AuthSession {
    pub fn new(method: AuthMethod) -> Self {
        Self {
            in_progress: false,
            method,
        }
    }
}

/// Something that can decide whether the person holding the device is the
/// account owner. Any delay (sensor, network, simulation) belongs here; the
/// navigation core only ever sees the outcome.
#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Runs one authentication attempt with the given method.
    async fn attempt(&self, method: AuthMethod) -> AuthOutcome;
}
