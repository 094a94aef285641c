//! Plan entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the plans table.
#[derive(Debug, Clone, FromRow)]
pub struct PlanEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration: String,
    pub amount: String,
    pub created_at: DateTime<Utc>,
}

impl From<PlanEntity> for domain::models::PlanRecord {
    fn from(entity: PlanEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            duration: entity.duration,
            amount: entity.amount,
            created_at: entity.created_at,
        }
    }
}
