//! Operator repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::OperatorEntity;
use crate::metrics::QueryTimer;

/// Repository for operator-account database operations.
#[derive(Clone)]
pub struct OperatorRepository {
    pool: PgPool,
}

impl OperatorRepository {
    /// Creates a new OperatorRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an operator account. Fails on duplicate email (unique index).
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<OperatorEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_operator");
        let result = sqlx::query_as::<_, OperatorEntity>(
            r#"
            INSERT INTO operators (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an operator by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<OperatorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_operator_by_email");
        let result = sqlx::query_as::<_, OperatorEntity>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM operators
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an operator by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<OperatorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_operator_by_id");
        let result = sqlx::query_as::<_, OperatorEntity>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM operators
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: OperatorRepository tests require a database connection.
}
