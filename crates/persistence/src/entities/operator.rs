//! Operator entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the operators table.
#[derive(Debug, Clone, FromRow)]
pub struct OperatorEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<OperatorEntity> for domain::models::Operator {
    fn from(entity: OperatorEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            created_at: entity.created_at,
        }
    }
}
