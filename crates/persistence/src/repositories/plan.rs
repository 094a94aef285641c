//! Plan repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::CreatePlanInput;

use crate::entities::PlanEntity;
use crate::metrics::QueryTimer;

/// Repository for plan-related database operations.
#[derive(Clone)]
pub struct PlanRepository {
    pool: PgPool,
}

impl PlanRepository {
    /// Creates a new PlanRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new plan.
    pub async fn insert(&self, input: &CreatePlanInput) -> Result<PlanEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_plan");
        let result = sqlx::query_as::<_, PlanEntity>(
            r#"
            INSERT INTO plans (name, description, duration, amount)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, duration, amount, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.duration)
        .bind(&input.amount)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all plans, newest first.
    pub async fn list(&self) -> Result<Vec<PlanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_plans");
        let result = sqlx::query_as::<_, PlanEntity>(
            r#"
            SELECT id, name, description, duration, amount, created_at
            FROM plans
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a plan by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PlanEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_plan_by_id");
        let result = sqlx::query_as::<_, PlanEntity>(
            r#"
            SELECT id, name, description, duration, amount, created_at
            FROM plans
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
    // Note: PlanRepository tests require a database connection.
}
