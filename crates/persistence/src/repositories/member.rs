//! Member repository: the external member collection behind the roster
//! loader's store seam.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{MemberRecord, NewMember};
use domain::services::roster::{MemberStore, PageCursor, StoreError};

use crate::entities::MemberEntity;
use crate::metrics::QueryTimer;

/// Repository for member-related database operations.
#[derive(Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Creates a new MemberRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new member record for an owner.
    pub async fn insert(
        &self,
        owner_id: Uuid,
        member: &NewMember,
    ) -> Result<MemberEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_member");
        let result = sqlx::query_as::<_, MemberEntity>(
            r#"
            INSERT INTO members (
                owner_id, full_name, address, contact_number, email,
                admission_date, expiry_date, status, seat_number,
                profile_image, document, due_amount, total_amount,
                paid_amount, plan_id, plan_name
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING id, owner_id, full_name, address, contact_number, email,
                      admission_date, expiry_date, status, seat_number,
                      profile_image, document, due_amount, total_amount,
                      paid_amount, plan_id, plan_name, created_at
            "#,
        )
        .bind(owner_id)
        .bind(&member.full_name)
        .bind(&member.address)
        .bind(&member.contact_number)
        .bind(&member.email)
        .bind(member.admission_date)
        .bind(member.expiry_date)
        .bind(member.status.as_str())
        .bind(&member.seat_number)
        .bind(&member.profile_image)
        .bind(&member.document)
        .bind(&member.due_amount)
        .bind(&member.total_amount)
        .bind(&member.paid_amount)
        .bind(member.plan_id)
        .bind(&member.plan)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find one member by ID, scoped to its owner.
    pub async fn find_by_id(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<MemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_member_by_id");
        let result = sqlx::query_as::<_, MemberEntity>(
            r#"
            SELECT id, owner_id, full_name, address, contact_number, email,
                   admission_date, expiry_date, status, seat_number,
                   profile_image, document, due_amount, total_amount,
                   paid_amount, plan_id, plan_name, created_at
            FROM members
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

    /// One page of an owner's members, newest first, strictly after the
    /// cursor when present.
    pub async fn list_page(
        &self,
        owner_id: Uuid,
        limit: i64,
        after: Option<PageCursor>,
    ) -> Result<Vec<MemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_members_page");
        let result = match after {
            Some(cursor) => {
                sqlx::query_as::<_, MemberEntity>(
                    r#"
                    SELECT id, owner_id, full_name, address, contact_number, email,
                           admission_date, expiry_date, status, seat_number,
                           profile_image, document, due_amount, total_amount,
                           paid_amount, plan_id, plan_name, created_at
                    FROM members
                    WHERE owner_id = $1 AND (created_at, id) < ($2, $3)
                    ORDER BY created_at DESC, id DESC
                    LIMIT $4
                    "#,
                )
                .bind(owner_id)
                .bind(cursor.created_at)
                .bind(cursor.id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, MemberEntity>(
                    r#"
                    SELECT id, owner_id, full_name, address, contact_number, email,
                           admission_date, expiry_date, status, seat_number,
                           profile_image, document, due_amount, total_amount,
                           paid_amount, plan_id, plan_name, created_at
                    FROM members
                    WHERE owner_id = $1
                    ORDER BY created_at DESC, id DESC
                    LIMIT $2
                    "#,
                )
                .bind(owner_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        };
        timer.record();
        result
    }

    /// Every member of an owner, newest first. Used by the overview and
    /// dashboard aggregates.
    pub async fn list_all(&self, owner_id: Uuid) -> Result<Vec<MemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_members");
        let result = sqlx::query_as::<_, MemberEntity>(
            r#"
            SELECT id, owner_id, full_name, address, contact_number, email,
                   admission_date, expiry_date, status, seat_number,
                   profile_image, document, due_amount, total_amount,
                   paid_amount, plan_id, plan_name, created_at
            FROM members
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[async_trait]
impl MemberStore for MemberRepository {
    async fn list_members_page(
        &self,
        owner: Uuid,
        limit: usize,
        after: Option<PageCursor>,
    ) -> Result<Vec<MemberRecord>, StoreError> {
        let entities = self
            .list_page(owner, limit as i64, after)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(entities.into_iter().map(Into::into).collect())
    }

    async fn insert_member(&self, owner: Uuid, member: NewMember) -> Result<Uuid, StoreError> {
        let entity = self
            .insert(owner, &member)
            .await
            .map_err(|e| StoreError::Insert(e.to_string()))?;
        Ok(entity.id)
    }
}

#[cfg(test)]
mod tests {
    // Note: MemberRepository tests require a database connection; the store
    // contract itself is covered against the in-memory double in the domain
    // crate.
}
