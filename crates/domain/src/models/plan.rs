//! Plan (pricing) domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{validate_amount, validate_duration_days};
use uuid::Uuid;
use validator::Validate;

/// A membership plan. Duration and amount are kept as strings, matching the
/// stored-data contract; typed accessors parse them on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Plan length in days, stored as a string.
    pub duration: String,
    /// Plan fee, stored as a decimal string.
    pub amount: String,
    pub created_at: DateTime<Utc>,
}

impl PlanRecord {
    /// Plan length in days; unparseable values count as zero, which
    /// disables expiry derivation at intake.
    pub fn duration_days(&self) -> i64 {
        self.duration.trim().parse::<i64>().unwrap_or(0)
    }

    /// Plan fee as a number; unparseable values count as zero.
    pub fn amount_value(&self) -> f64 {
        shared::validation::parse_amount_or_zero(&self.amount)
    }
}

/// Validated input for creating a plan.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanInput {
    #[validate(length(min = 1, max = 100, message = "Plan name is required"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_duration_days"))]
    pub duration: String,

    #[validate(custom(function = "validate_amount"))]
    pub amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(duration: &str, amount: &str) -> PlanRecord {
        PlanRecord {
            id: Uuid::new_v4(),
            name: "g1 monthly".to_string(),
            description: None,
            duration: duration.to_string(),
            amount: amount.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_duration_days_parses() {
        assert_eq!(plan("30", "2000").duration_days(), 30);
        assert_eq!(plan(" 90 ", "2000").duration_days(), 90);
        assert_eq!(plan("monthly", "2000").duration_days(), 0);
    }

    #[test]
    fn test_amount_value_parses() {
        assert_eq!(plan("30", "2000").amount_value(), 2000.0);
        assert_eq!(plan("30", "bad").amount_value(), 0.0);
    }

    #[test]
    fn test_create_plan_input_validation() {
        let valid = CreatePlanInput {
            name: "g1 monthly".to_string(),
            description: Some("One month access".to_string()),
            duration: "30".to_string(),
            amount: "2000".to_string(),
        };
        assert!(valid.validate().is_ok());

        let no_name = CreatePlanInput {
            name: String::new(),
            description: None,
            duration: "30".to_string(),
            amount: "2000".to_string(),
        };
        assert!(no_name.validate().is_err());

        let bad_duration = CreatePlanInput {
            name: "g1".to_string(),
            description: None,
            duration: "0".to_string(),
            amount: "2000".to_string(),
        };
        assert!(bad_duration.validate().is_err());

        let bad_amount = CreatePlanInput {
            name: "g1".to_string(),
            description: None,
            duration: "30".to_string(),
            amount: "-5".to_string(),
        };
        assert!(bad_amount.validate().is_err());
    }
}
