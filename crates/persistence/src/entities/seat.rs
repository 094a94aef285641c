//! Seat entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the seats table.
#[derive(Debug, Clone, FromRow)]
pub struct SeatEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub seat_number: i32,
    pub is_allocated: bool,
    pub allocated_to: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<SeatEntity> for domain::models::SeatRecord {
    fn from(entity: SeatEntity) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            seat_number: entity.seat_number,
            is_allocated: entity.is_allocated,
            allocated_to: entity.allocated_to,
            created_at: entity.created_at,
        }
    }
}
