//! Finance ledger domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Ledger entry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Earning,
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Earning => "Earning",
            EntryKind::Expense => "Expense",
        }
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Earning" => Ok(EntryKind::Earning),
            "Expense" => Ok(EntryKind::Expense),
            _ => Err(format!("Invalid ledger entry kind: {}", s)),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One earning or expense entry in an operator's ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating or updating a ledger entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewLedgerEntry {
    #[validate(length(min = 1, max = 200, message = "Description is required"))]
    pub description: String,

    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: f64,

    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Ledger entry amounts must be strictly positive.
fn validate_positive_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount");
        err.message = Some("Amount must be greater than zero".into());
        Err(err)
    }
}

/// Ledger totals for an operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub total_earning: f64,
    pub total_expense: f64,
    pub net: f64,
}

/// Sums earnings and expenses over a ledger.
pub fn summarize(entries: &[LedgerEntry]) -> FinanceSummary {
    let total_earning: f64 = entries
        .iter()
        .filter(|e| e.kind == EntryKind::Earning)
        .map(|e| e.amount)
        .sum();
    let total_expense: f64 = entries
        .iter()
        .filter(|e| e.kind == EntryKind::Expense)
        .map(|e| e.amount)
        .sum();

    FinanceSummary {
        total_earning,
        total_expense,
        net: total_earning - total_expense,
    }
}
