//! Ledger entry entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use domain::models::EntryKind;

/// Database row mapping for the finance_entries table.
#[derive(Debug, Clone, FromRow)]
pub struct LedgerEntryEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub description: String,
    pub amount: f64,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

impl From<LedgerEntryEntity> for domain::models::LedgerEntry {
    fn from(entity: LedgerEntryEntity) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            description: entity.description,
            amount: entity.amount,
            kind: EntryKind::from_str(&entity.kind).unwrap_or(EntryKind::Expense),
            created_at: entity.created_at,
        }
    }
}
