//! Operator account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An operator account. Every member record, seat and ledger entry is
/// scoped to the operator that created it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)] // Never serialize the hash to API responses
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let operator = Operator {
            id: Uuid::new_v4(),
            email: "owner@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&operator).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("passwordHash"));
        assert!(json.contains("owner@example.com"));
    }
}
