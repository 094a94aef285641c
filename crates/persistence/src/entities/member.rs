//! Member entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use domain::models::MemberStatus;

/// Database row mapping for the members table.
#[derive(Debug, Clone, FromRow)]
pub struct MemberEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub full_name: String,
    pub address: String,
    pub contact_number: String,
    pub email: String,
    pub admission_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub status: String,
    pub seat_number: String,
    pub profile_image: Option<String>,
    pub document: Option<String>,
    pub due_amount: String,
    pub total_amount: String,
    pub paid_amount: String,
    pub plan_id: Option<Uuid>,
    pub plan_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MemberEntity> for domain::models::MemberRecord {
    fn from(entity: MemberEntity) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            full_name: entity.full_name,
            address: entity.address,
            contact_number: entity.contact_number,
            email: entity.email,
            admission_date: entity.admission_date,
            expiry_date: entity.expiry_date,
            status: MemberStatus::from_str(&entity.status).unwrap_or_default(),
            seat_number: entity.seat_number,
            profile_image: entity.profile_image,
            document: entity.document,
            due_amount: entity.due_amount,
            total_amount: entity.total_amount,
            paid_amount: entity.paid_amount,
            plan_id: entity.plan_id,
            plan: entity.plan_name,
            created_at: entity.created_at,
        }
    }
}
