//! # Currency Conversion
//!
//! Deterministic conversion over a static rate table. Rates are quoted as
//! foreign-currency-per-USD, so USD is always `1`.
//!
//! All arithmetic is done in [`Decimal`]. Results are never rounded; rounding
//! to cents only happens in the `format_*` helpers at display time.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("amount must not be negative: {0}")]
    NegativeAmount(Decimal),
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
    #[error("rate table has no entry for {0}")]
    IncompleteRateTable(CurrencyCode),
    #[error("rate for {0} must be positive")]
    NonPositiveRate(CurrencyCode),
    #[error("USD is the base currency and its rate is fixed at 1 (got {0})")]
    BaseRateFixed(Decimal),
    #[error("converted amount out of range")]
    Overflow,
}

const CURRENCY_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CurrencyCode {
    USD,
    INR,
    EUR,
    GBP,
    CAD,
    AUD,
    JPY,
    CNY,
    SGD,
    AED,
}

impl CurrencyCode {
    pub const ALL: [CurrencyCode; CURRENCY_COUNT] = [
        CurrencyCode::USD,
        CurrencyCode::INR,
        CurrencyCode::EUR,
        CurrencyCode::GBP,
        CurrencyCode::CAD,
        CurrencyCode::AUD,
        CurrencyCode::JPY,
        CurrencyCode::CNY,
        CurrencyCode::SGD,
        CurrencyCode::AED,
    ];

    pub fn code(self) -> &'static str {
        match self {
            CurrencyCode::USD => "USD",
            CurrencyCode::INR => "INR",
            CurrencyCode::EUR => "EUR",
            CurrencyCode::GBP => "GBP",
            CurrencyCode::CAD => "CAD",
            CurrencyCode::AUD => "AUD",
            CurrencyCode::JPY => "JPY",
            CurrencyCode::CNY => "CNY",
            CurrencyCode::SGD => "SGD",
            CurrencyCode::AED => "AED",
        }
    }

    pub fn symbol(self) -> Option<&'static str> {
        match self {
            CurrencyCode::USD => Some("$"),
            CurrencyCode::INR => Some("₹"),
            CurrencyCode::EUR => Some("€"),
            CurrencyCode::GBP => Some("£"),
            _ => None,
        }
    }

    /// The next code in the table, wrapping around. Used by currency pickers.
    pub fn next(self) -> CurrencyCode {
        let idx = self.index();
        CurrencyCode::ALL[(idx + 1) % CURRENCY_COUNT]
    }

    pub fn prev(self) -> CurrencyCode {
        let idx = self.index();
        CurrencyCode::ALL[(idx + CURRENCY_COUNT - 1) % CURRENCY_COUNT]
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| ConversionError::UnknownCurrency(s.to_string()))
    }
}

/// A complete, validated table of rates. One entry per [`CurrencyCode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    rates: [Decimal; CURRENCY_COUNT],
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            rates: [
                Decimal::new(100, 2),    // USD
                Decimal::new(8312, 2),   // INR
                Decimal::new(92, 2),     // EUR
                Decimal::new(79, 2),     // GBP
                Decimal::new(136, 2),    // CAD
                Decimal::new(153, 2),    // AUD
                Decimal::new(15043, 2),  // JPY
                Decimal::new(722, 2),    // CNY
                Decimal::new(135, 2),    // SGD
                Decimal::new(367, 2),    // AED
            ],
        }
    }
}

impl RateTable {
    /// Builds a table from explicit entries. Every code must be present
    /// with a positive rate and USD must be exactly 1; later duplicates win.
    pub fn from_entries<I>(entries: I) -> Result<Self, ConversionError>
    where
        I: IntoIterator<Item = (CurrencyCode, Decimal)>,
    {
        let mut slots: [Option<Decimal>; CURRENCY_COUNT] = [None; CURRENCY_COUNT];
        for (code, rate) in entries {
            slots[code.index()] = Some(rate);
        }

        let mut rates = [Decimal::ZERO; CURRENCY_COUNT];
        for code in CurrencyCode::ALL {
            let rate = slots[code.index()].ok_or(ConversionError::IncompleteRateTable(code))?;
            if rate <= Decimal::ZERO {
                return Err(ConversionError::NonPositiveRate(code));
            }
            if code == CurrencyCode::USD && rate != Decimal::ONE {
                return Err(ConversionError::BaseRateFixed(rate));
            }
            rates[code.index()] = rate;
        }
        Ok(Self { rates })
    }

    /// Default table with some entries replaced.
    pub fn with_overrides<I>(overrides: I) -> Result<Self, ConversionError>
    where
        I: IntoIterator<Item = (CurrencyCode, Decimal)>,
    {
        let base = Self::default();
        let entries = base.iter().chain(overrides);
        Self::from_entries(entries.collect::<Vec<_>>())
    }

    pub fn rate(&self, code: CurrencyCode) -> Decimal {
        self.rates[code.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (CurrencyCode, Decimal)> + '_ {
        CurrencyCode::ALL.into_iter().map(|code| (code, self.rate(code)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionRequest {
    pub amount: Decimal,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionResult {
    pub converted_amount: Decimal,
    pub effective_rate: Decimal,
}

/// Display-only rate, e.g. `1 USD = 83.1200 INR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateQuote {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: Decimal,
}

impl fmt::Display for RateQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1 {} = {} {}", self.from, fixed(self.rate, 4), self.to)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConversionEngine {
    rates: RateTable,
}

impl ConversionEngine {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn convert(
        &self,
        amount: Decimal,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<ConversionResult, ConversionError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ConversionError::NegativeAmount(amount));
        }

        if from == to {
            return Ok(ConversionResult {
                converted_amount: amount,
                effective_rate: Decimal::ONE,
            });
        }

        let effective_rate = self.effective_rate(from, to)?;
        let converted_amount = amount
            .checked_mul(effective_rate)
            .ok_or(ConversionError::Overflow)?;

        Ok(ConversionResult {
            converted_amount,
            effective_rate,
        })
    }

    pub fn convert_request(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionResult, ConversionError> {
        self.convert(request.amount, request.from, request.to)
    }

    /// String-coded entry point for callers that hold raw codes.
    pub fn convert_str(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<ConversionResult, ConversionError> {
        self.convert(amount, from.parse()?, to.parse()?)
    }

    /// Fails with `Overflow` when the cross rate does not fit a `Decimal`.
    pub fn quote(&self, from: CurrencyCode, to: CurrencyCode) -> Result<RateQuote, ConversionError> {
        let rate = if from == to {
            Decimal::ONE
        } else {
            self.effective_rate(from, to)?
        };
        Ok(RateQuote { from, to, rate })
    }

    /// Value of `amount` in USD.
    pub fn to_usd(&self, amount: Decimal, currency: CurrencyCode) -> Result<Decimal, ConversionError> {
        Ok(self.convert(amount, currency, CurrencyCode::USD)?.converted_amount)
    }

    fn effective_rate(&self, from: CurrencyCode, to: CurrencyCode) -> Result<Decimal, ConversionError> {
        self.rates
            .rate(to)
            .checked_div(self.rates.rate(from))
            .ok_or(ConversionError::Overflow)
    }
}

/// Accepts what the amount field allows while typing: digits, at most one
/// dot, at most two digits after it. The empty string is accepted.
pub fn accepts_amount_input(input: &str) -> bool {
    let mut parts = input.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let frac = parts.next();
    whole.chars().all(|c| c.is_ascii_digit())
        && frac.is_none_or(|f| f.len() <= 2 && f.chars().all(|c| c.is_ascii_digit()))
}

/// Parses a completed amount field. `None` for empty or malformed input.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "." || !accepts_amount_input(trimmed) {
        return None;
    }
    let normalized = if trimmed.starts_with('.') {
        format!("0{trimmed}")
    } else if trimmed.ends_with('.') {
        trimmed.trim_end_matches('.').to_string()
    } else {
        trimmed.to_string()
    };
    Decimal::from_str(&normalized).ok()
}

/// `$8312.00`, `₹12500.00`, `JPY 150.43`. Rounds to cents.
pub fn format_money(amount: Decimal, currency: CurrencyCode) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    let value = fixed(amount.abs(), 2);
    match currency.symbol() {
        Some(symbol) => format!("{sign}{symbol}{value}"),
        None => format!("{sign}{currency} {value}"),
    }
}

/// Like [`format_money`] but always carries a sign, for transaction lists.
pub fn format_signed(amount: Decimal, currency: CurrencyCode) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        format_money(amount, currency)
    } else {
        format!("+{}", format_money(amount, currency))
    }
}

fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp(dp);
    rounded.rescale(dp);
    rounded.to_string()
}
