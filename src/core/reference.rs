//! # Reference Data
//!
//! The sample records the wallet screens display: contacts, transactions,
//! spending, funding sources and so on. Embedded at build time from
//! `assets/reference_data.json` and read-only for the life of the process.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::budget::{Budget, BudgetError, CategorySpend};
use crate::core::conversion::CurrencyCode;

const EMBEDDED: &str = include_str!("../../assets/reference_data.json");

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("reference data is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("reference budget is invalid: {0}")]
    Budget(#[from] BudgetError),
}

pub type ContactId = u32;
pub type TransactionId = u32;
pub type FundingSourceId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub blockchain_id: String,
    pub blockchain_id_type: String,
    pub last_verified: String,
    pub security_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletBalance {
    pub currency: CurrencyCode,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundingKind {
    Bank,
    Card,
    International,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingSource {
    pub id: FundingSourceId,
    pub kind: FundingKind,
    pub name: String,
    pub account_number: String,
    pub is_default: bool,
    pub currency: CurrencyCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub country: String,
    pub currency: CurrencyCode,
    pub recent: bool,
    pub favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub name: String,
    pub date: String,
    /// Negative for money going out.
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub contact_id: Option<ContactId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLimit {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub spending: Decimal,
    pub income: Decimal,
    pub forecast: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsRecommendation {
    pub title: String,
    pub description: String,
    pub potential: Decimal,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    pub transaction_id: TransactionId,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledFlow {
    pub name: String,
    pub amount: Decimal,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowForecast {
    pub current_balance: Decimal,
    pub end_of_month_prediction: Decimal,
    pub next_month: Decimal,
    pub upcoming_expenses: Vec<ScheduledFlow>,
    pub anticipated_income: Vec<ScheduledFlow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub profile: Profile,
    pub wallet_balances: Vec<WalletBalance>,
    pub funding_sources: Vec<FundingSource>,
    pub contacts: Vec<Contact>,
    pub transactions: Vec<Transaction>,
    pub spending_by_category: Vec<CategorySpend>,
    pub default_budget: Vec<BudgetLimit>,
    pub monthly_trends: Vec<MonthlyTrend>,
    pub savings_recommendations: Vec<SavingsRecommendation>,
    pub anomalies: Vec<Anomaly>,
    pub cash_flow: CashFlowForecast,
}

impl ReferenceData {
    /// Parses the embedded sample data.
    pub fn embedded() -> Result<Self, ReferenceDataError> {
        Self::from_json(EMBEDDED)
    }

    pub fn from_json(json: &str) -> Result<Self, ReferenceDataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn contact(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn recent_contacts(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter().filter(|c| c.recent)
    }

    pub fn favorite_contacts(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter().filter(|c| c.favorite)
    }

    pub fn funding_source(&self, id: FundingSourceId) -> Option<&FundingSource> {
        self.funding_sources.iter().find(|s| s.id == id)
    }

    pub fn default_funding_source(&self) -> Option<&FundingSource> {
        self.funding_sources
            .iter()
            .find(|s| s.is_default)
            .or_else(|| self.funding_sources.first())
    }

    /// Budget built from the default limits and this month's spend.
    pub fn budget(&self) -> Result<Budget, ReferenceDataError> {
        let limits = self
            .default_budget
            .iter()
            .map(|l| (l.category.clone(), l.amount))
            .collect();
        Ok(Budget::new(limits, self.spending_by_category.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::budget::BudgetStatus;
    use crate::core::conversion::RateTable;

    #[test]
    fn test_embedded_data_parses() {
        let data = ReferenceData::embedded().unwrap();
        assert_eq!(data.contacts.len(), 6);
        assert_eq!(data.transactions.len(), 10);
        assert_eq!(data.wallet_balances[0].currency, CurrencyCode::USD);
        assert_eq!(data.wallet_balances[0].balance, Decimal::new(245850, 2));
    }

    #[test]
    fn test_every_referenced_currency_has_a_rate() {
        let data = ReferenceData::embedded().unwrap();
        let rates = RateTable::default();
        for contact in &data.contacts {
            assert!(rates.rate(contact.currency) > Decimal::ZERO);
        }
        for source in &data.funding_sources {
            assert!(rates.rate(source.currency) > Decimal::ZERO);
        }
    }

    #[test]
    fn test_lookup_helpers() {
        let data = ReferenceData::embedded().unwrap();
        assert_eq!(data.contact(1).map(|c| c.currency), Some(CurrencyCode::INR));
        assert!(data.contact(99).is_none());
        assert_eq!(data.transaction(8).map(|t| t.name.as_str()), Some("Online Store"));
        assert_eq!(data.recent_contacts().count(), 4);
        assert_eq!(data.favorite_contacts().count(), 3);
        assert_eq!(data.funding_source(4).map(|s| s.currency), Some(CurrencyCode::GBP));
        assert!(data.funding_source(9).is_none());
        assert_eq!(data.default_funding_source().map(|s| s.id), Some(1));
    }

    #[test]
    fn test_budget_from_reference_data() {
        let budget = ReferenceData::embedded().unwrap().budget().unwrap();
        // The sample month is tight: every category is past 90%.
        for category in budget.categories() {
            assert_eq!(category.report().unwrap().status, BudgetStatus::Danger, "{}", category.name);
        }
        let summary = budget.summary().unwrap();
        assert_eq!(summary.total_budget, Decimal::from(1320));
        assert_eq!(summary.total_spent, Decimal::new(124723, 2));
        assert_eq!(summary.health(), BudgetStatus::Warning);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            ReferenceData::from_json("{ \"profile\": 1 }"),
            Err(ReferenceDataError::Parse(_))
        ));
    }
}
