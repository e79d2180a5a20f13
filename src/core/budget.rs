//! # Budget Status
//!
//! Per-category spend status plus the totals shown by the budget manager.
//! Pure derivation: nothing here is stored beyond the budgeted and spent
//! amounts themselves.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    #[error("budget for '{category}' must be positive")]
    NonPositiveBudget { category: String },
    #[error("unknown budget category: {0}")]
    UnknownCategory(String),
    #[error("budget figures for '{0}' are out of range")]
    OutOfRange(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Normal,
    Warning,
    Danger,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BudgetStatus::Normal => "normal",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Danger => "danger",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetReport {
    pub status: BudgetStatus,
    /// Unrounded, `spent / budgeted * 100`.
    pub percentage: Decimal,
}

const DANGER_AT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);
const WARNING_AT: Decimal = Decimal::from_parts(75, 0, 0, false, 0);
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Classifies spend against a budget. Both tier bounds are inclusive:
/// exactly 90% is `Danger`, exactly 75% is `Warning`.
pub fn budget_status(
    category: &str,
    spent: Decimal,
    budgeted: Decimal,
) -> Result<BudgetReport, BudgetError> {
    if budgeted <= Decimal::ZERO {
        return Err(BudgetError::NonPositiveBudget {
            category: category.to_string(),
        });
    }

    let percentage = spent
        .checked_div(budgeted)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .ok_or_else(|| BudgetError::OutOfRange(category.to_string()))?;
    let status = if percentage >= DANGER_AT {
        BudgetStatus::Danger
    } else if percentage >= WARNING_AT {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Normal
    };
    Ok(BudgetReport { status, percentage })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetCategory {
    pub name: String,
    pub budgeted: Decimal,
    pub spent: Decimal,
}

impl BudgetCategory {
    pub fn report(&self) -> Result<BudgetReport, BudgetError> {
        budget_status(&self.name, self.spent, self.budgeted)
    }
}

/// Spend recorded against a category, as it comes from reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetSummary {
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub remaining: Decimal,
    pub percentage_used: Decimal,
}

impl BudgetSummary {
    /// Colour of the overall bar. Unlike the per-category tiers these bounds
    /// are exclusive: over 100% is `Danger`, over 80% is `Warning`.
    pub fn health(&self) -> BudgetStatus {
        if self.percentage_used > HUNDRED {
            BudgetStatus::Danger
        } else if self.percentage_used > Decimal::from(80) {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Normal
        }
    }
}

/// Budgeted amounts per category (in display order) and the month's spend.
#[derive(Debug, Clone, Default)]
pub struct Budget {
    limits: Vec<(String, Decimal)>,
    spending: Vec<CategorySpend>,
}

impl Budget {
    pub fn new(
        limits: Vec<(String, Decimal)>,
        spending: Vec<CategorySpend>,
    ) -> Result<Self, BudgetError> {
        if let Some((name, _)) = limits.iter().find(|(_, amount)| *amount <= Decimal::ZERO) {
            return Err(BudgetError::NonPositiveBudget {
                category: name.clone(),
            });
        }
        Ok(Self { limits, spending })
    }

    /// Spend for a category, matched case-insensitively. No entry means
    /// nothing was spent.
    pub fn spent(&self, category: &str) -> Decimal {
        self.spending
            .iter()
            .find(|s| s.category.eq_ignore_ascii_case(category))
            .map(|s| s.amount)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn category(&self, name: &str) -> Result<BudgetCategory, BudgetError> {
        self.limits
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(n, budgeted)| BudgetCategory {
                name: n.clone(),
                budgeted: *budgeted,
                spent: self.spent(n),
            })
            .ok_or_else(|| BudgetError::UnknownCategory(name.to_string()))
    }

    pub fn categories(&self) -> Vec<BudgetCategory> {
        self.limits
            .iter()
            .map(|(name, budgeted)| BudgetCategory {
                name: name.clone(),
                budgeted: *budgeted,
                spent: self.spent(name),
            })
            .collect()
    }

    pub fn status_for(&self, name: &str) -> Result<BudgetReport, BudgetError> {
        self.category(name)?.report()
    }

    pub fn set_budget(&mut self, name: &str, amount: Decimal) -> Result<(), BudgetError> {
        let slot = self
            .limits
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .ok_or_else(|| BudgetError::UnknownCategory(name.to_string()))?;
        if amount <= Decimal::ZERO {
            return Err(BudgetError::NonPositiveBudget {
                category: slot.0.clone(),
            });
        }
        slot.1 = amount;
        Ok(())
    }

    pub fn summary(&self) -> Result<BudgetSummary, BudgetError> {
        let out_of_range = || BudgetError::OutOfRange("total".to_string());
        let total_budget = checked_sum(self.limits.iter().map(|(_, amount)| *amount))
            .ok_or_else(out_of_range)?;
        let total_spent =
            checked_sum(self.spending.iter().map(|s| s.amount)).ok_or_else(out_of_range)?;
        let percentage_used = if total_budget.is_zero() {
            Decimal::ZERO
        } else {
            total_spent
                .checked_div(total_budget)
                .and_then(|ratio| ratio.checked_mul(HUNDRED))
                .ok_or_else(out_of_range)?
        };
        Ok(BudgetSummary {
            total_budget,
            total_spent,
            remaining: total_budget
                .checked_sub(total_spent)
                .ok_or_else(out_of_range)?,
            percentage_used,
        })
    }
}

fn checked_sum(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    values.fold(Some(Decimal::ZERO), |acc, v| acc?.checked_add(v))
}
