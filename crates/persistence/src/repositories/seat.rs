//! Seat repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SeatEntity;
use crate::metrics::QueryTimer;

/// Repository for seat-related database operations.
#[derive(Clone)]
pub struct SeatRepository {
    pool: PgPool,
}

impl SeatRepository {
    /// Creates a new SeatRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Number of seats in an owner's pool.
    pub async fn count(&self, owner_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_seats");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM seats WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a batch of seats with the given numbers.
    pub async fn insert_batch(
        &self,
        owner_id: Uuid,
        seat_numbers: &[i32],
    ) -> Result<Vec<SeatEntity>, sqlx::Error> {
        let timer = QueryTimer::new("insert_seats");
        let result = sqlx::query_as::<_, SeatEntity>(
            r#"
            INSERT INTO seats (owner_id, seat_number)
            SELECT $1, n FROM UNNEST($2::int4[]) AS n
            RETURNING id, owner_id, seat_number, is_allocated, allocated_to, created_at
            "#,
        )
        .bind(owner_id)
        .bind(seat_numbers.to_vec())
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List an owner's seats in seat-number order.
    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<SeatEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_seats");
        let result = sqlx::query_as::<_, SeatEntity>(
            r#"
            SELECT id, owner_id, seat_number, is_allocated, allocated_to, created_at
            FROM seats
            WHERE owner_id = $1
            ORDER BY seat_number
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find one seat by ID, scoped to its owner.
    pub async fn find_by_id(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<SeatEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_seat_by_id");
        let result = sqlx::query_as::<_, SeatEntity>(
            r#"
            SELECT id, owner_id, seat_number, is_allocated, allocated_to, created_at
            FROM seats
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Allocate a free seat to a member. Returns `None` when the seat does
    /// not exist or is already allocated; the guard is part of the UPDATE so
    /// two concurrent allotments cannot both win.
    pub async fn allot(
        &self,
        owner_id: Uuid,
        seat_id: Uuid,
        member_id: Uuid,
    ) -> Result<Option<SeatEntity>, sqlx::Error> {
        let timer = QueryTimer::new("allot_seat");
        let result = sqlx::query_as::<_, SeatEntity>(
            r#"
            UPDATE seats
            SET is_allocated = true, allocated_to = $3
            WHERE id = $1 AND owner_id = $2 AND is_allocated = false
            RETURNING id, owner_id, seat_number, is_allocated, allocated_to, created_at
            "#,
        )
        .bind(seat_id)
        .bind(owner_id)
        .bind(member_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: SeatRepository tests require a database connection; the pool cap
    // and allotment rules are covered in the domain crate.
}
