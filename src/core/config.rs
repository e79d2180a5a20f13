//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.munir/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::auth::AuthMethod;
use crate::core::conversion::{CurrencyCode, RateTable};
use crate::core::navigation::CancelPolicy;
use crate::core::screen::ScreenId;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MunirConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub transfer: TransferConfig,
    /// Per-currency overrides of the built-in rate table.
    #[serde(default)]
    pub rates: BTreeMap<CurrencyCode, Decimal>,
    /// Per-category overrides of the default monthly budget.
    #[serde(default)]
    pub budget: BTreeMap<String, Decimal>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_screen: Option<ScreenId>,
    pub source_currency: Option<CurrencyCode>,
    pub recipient_currency: Option<CurrencyCode>,
    pub toast_duration_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SecurityConfig {
    pub biometric_gating: Option<bool>,
    pub auth_method: Option<AuthMethod>,
    pub auth_delay_ms: Option<u64>,
    pub on_cancel: Option<CancelPolicy>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TransferConfig {
    pub confirmation_delay_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_AUTH_DELAY_MS: u64 = 1500;
pub const DEFAULT_TRANSFER_DELAY_MS: u64 = 2000;
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub start_screen: ScreenId,
    pub source_currency: CurrencyCode,
    pub recipient_currency: CurrencyCode,
    pub toast_duration: Duration,
    pub biometric_gating: bool,
    pub auth_method: AuthMethod,
    pub auth_delay: Duration,
    pub cancel_policy: CancelPolicy,
    pub transfer_delay: Duration,
    pub rates: RateTable,
    pub budget_overrides: Vec<(String, Decimal)>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            start_screen: ScreenId::Welcome,
            source_currency: CurrencyCode::USD,
            recipient_currency: CurrencyCode::USD,
            toast_duration: Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
            biometric_gating: true,
            auth_method: AuthMethod::default(),
            auth_delay: Duration::from_millis(DEFAULT_AUTH_DELAY_MS),
            cancel_policy: CancelPolicy::default(),
            transfer_delay: Duration::from_millis(DEFAULT_TRANSFER_DELAY_MS),
            rates: RateTable::default(),
            budget_overrides: Vec::new(),
        }
    }
}

/// Values given on the command line. `None`/`false` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub no_gating: bool,
    pub auth_delay_ms: Option<u64>,
    pub auth_method: Option<AuthMethod>,
    pub start_screen: Option<ScreenId>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.munir/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".munir").join("config.toml"))
}

/// Load config from `~/.munir/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MunirConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MunirConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MunirConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MunirConfig::default());
    }

    let contents = fs::read_to_string(&path)?;
    let config: MunirConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Munir Wallet Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_screen = "welcome"           # any screen name, e.g. "dashboard"
# source_currency = "USD"
# recipient_currency = "USD"
# toast_duration_ms = 3000

# [security]
# biometric_gating = true            # Or set MUNIR_BIOMETRIC_GATING
# auth_method = "fingerprint"        # "fingerprint" or "face"
# auth_delay_ms = 1500               # Simulated scan time
# on_cancel = "fallback"             # "fallback" (dashboard) or "return_to_origin"

# [transfer]
# confirmation_delay_ms = 2000

# [rates]                            # Units of currency per 1 USD (USD stays 1)
# INR = 83.12
# EUR = 0.92

# [budget]                           # Monthly budget per category
# food = 350
# shopping = 250
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MunirConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an explicit environment lookup.
pub fn resolve_with_env<F>(
    config: &MunirConfig,
    cli: &CliOverrides,
    env: F,
) -> Result<ResolvedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = ResolvedConfig::default();

    // Gating: CLI (can only disable) → env → config → default
    let env_gating = env("MUNIR_BIOMETRIC_GATING").and_then(|v| parse_flag(&v));
    let biometric_gating = !cli.no_gating
        && env_gating
            .or(config.security.biometric_gating)
            .unwrap_or(defaults.biometric_gating);

    // Auth delay: CLI → env → config → default
    let auth_delay_ms = cli
        .auth_delay_ms
        .or_else(|| env("MUNIR_AUTH_DELAY_MS").and_then(|v| v.trim().parse().ok()))
        .or(config.security.auth_delay_ms)
        .unwrap_or(DEFAULT_AUTH_DELAY_MS);

    // Auth method: CLI → env → config → default
    let auth_method = cli
        .auth_method
        .or_else(|| env("MUNIR_AUTH_METHOD").and_then(|v| v.parse().ok()))
        .or(config.security.auth_method)
        .unwrap_or(defaults.auth_method);

    let rates = RateTable::with_overrides(config.rates.iter().map(|(code, rate)| (*code, *rate)))
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;

    if let Some((category, _)) = config.budget.iter().find(|(_, amount)| **amount <= Decimal::ZERO) {
        return Err(ConfigError::Invalid(format!(
            "budget for '{category}' must be positive"
        )));
    }

    Ok(ResolvedConfig {
        start_screen: cli
            .start_screen
            .or(config.general.start_screen)
            .unwrap_or(defaults.start_screen),
        source_currency: config
            .general
            .source_currency
            .unwrap_or(defaults.source_currency),
        recipient_currency: config
            .general
            .recipient_currency
            .unwrap_or(defaults.recipient_currency),
        toast_duration: Duration::from_millis(
            config
                .general
                .toast_duration_ms
                .unwrap_or(DEFAULT_TOAST_DURATION_MS),
        ),
        biometric_gating,
        auth_method,
        auth_delay: Duration::from_millis(auth_delay_ms),
        cancel_policy: config.security.on_cancel.unwrap_or_default(),
        transfer_delay: Duration::from_millis(
            config
                .transfer
                .confirmation_delay_ms
                .unwrap_or(DEFAULT_TRANSFER_DELAY_MS),
        ),
        rates,
        budget_overrides: config
            .budget
            .iter()
            .map(|(category, amount)| (category.clone(), *amount))
            .collect(),
    })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            warn!("Ignoring unrecognized boolean value: {}", other);
            None
        }
    }
}
