//! Finance ledger repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::NewLedgerEntry;

use crate::entities::LedgerEntryEntity;
use crate::metrics::QueryTimer;

/// Repository for finance-ledger database operations.
#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    /// Creates a new FinanceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a ledger entry for an owner.
    pub async fn insert(
        &self,
        owner_id: Uuid,
        entry: &NewLedgerEntry,
    ) -> Result<LedgerEntryEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_ledger_entry");
        let result = sqlx::query_as::<_, LedgerEntryEntity>(
            r#"
            INSERT INTO finance_entries (owner_id, description, amount, kind)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, description, amount, kind, created_at
            "#,
        )
        .bind(owner_id)
        .bind(&entry.description)
        .bind(entry.amount)
        .bind(entry.kind.as_str())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List an owner's ledger entries, newest first.
    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<LedgerEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_ledger_entries");
        let result = sqlx::query_as::<_, LedgerEntryEntity>(
            r#"
            SELECT id, owner_id, description, amount, kind, created_at
            FROM finance_entries
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update an entry's description, amount and kind.
    pub async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        entry: &NewLedgerEntry,
    ) -> Result<Option<LedgerEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_ledger_entry");
        let result = sqlx::query_as::<_, LedgerEntryEntity>(
            r#"
            UPDATE finance_entries
            SET description = $3, amount = $4, kind = $5
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, description, amount, kind, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&entry.description)
        .bind(entry.amount)
        .bind(entry.kind.as_str())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an entry. Returns the number of rows removed.
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_ledger_entry");
        let result = sqlx::query(
            r#"
            DELETE FROM finance_entries
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected());
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: FinanceRepository tests require a database connection.
}
