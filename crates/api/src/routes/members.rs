//! Member roster routes: paged listing, classified overview, intake.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain::models::{MemberRecord, MemberStatus, PlanRecord};
use domain::services::classify::{classify, RosterView};
use domain::services::intake::IntakeForm;
use domain::services::roster::PageCursor;
use persistence::repositories::{MemberRepository, PlanRepository};
use shared::pagination::{decode_cursor, encode_cursor};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::OperatorAuth;

/// Upper bound on a requested page size.
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMembersQuery {
    pub limit: Option<usize>,
    pub cursor: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPageResponse {
    pub members: Vec<MemberRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    /// Full-page heuristic: a full page suggests more may follow.
    pub has_more: bool,
}

/// One page of the operator's roster, newest first.
///
/// GET /api/v1/members?limit=5&cursor=...
pub async fn list_members(
    State(state): State<AppState>,
    operator: OperatorAuth,
    Query(query): Query<ListMembersQuery>,
) -> Result<Json<MemberPageResponse>, ApiError> {
    let page_size = query
        .limit
        .unwrap_or(state.config.roster.page_size)
        .clamp(1, MAX_PAGE_SIZE);

    let after = match &query.cursor {
        Some(cursor) => {
            let (created_at, id) =
                decode_cursor(cursor).map_err(|_| ApiError::validation("Invalid cursor"))?;
            Some(PageCursor { created_at, id })
        }
        None => None,
    };

    let repo = MemberRepository::new(state.pool.clone());
    let entities = repo
        .list_page(operator.operator_id, page_size as i64, after)
        .await?;
    let members: Vec<MemberRecord> = entities.into_iter().map(Into::into).collect();

    let has_more = members.len() == page_size;
    let next_cursor = members.last().map(|m| encode_cursor(m.created_at, m.id));

    Ok(Json(MemberPageResponse {
        members,
        next_cursor,
        has_more,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewQuery {
    pub view: Option<RosterView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterOverviewResponse {
    pub total: usize,
    pub live_count: usize,
    pub expired_count: usize,
    pub view: RosterView,
    pub members: Vec<MemberRecord>,
}

/// The loaded roster classified by expiry against the current instant.
///
/// GET /api/v1/members/overview?view=live|expired|all
pub async fn roster_overview(
    State(state): State<AppState>,
    operator: OperatorAuth,
    Query(query): Query<OverviewQuery>,
) -> Result<Json<RosterOverviewResponse>, ApiError> {
    let repo = MemberRepository::new(state.pool.clone());
    let records: Vec<MemberRecord> = repo
        .list_all(operator.operator_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let buckets = classify(&records, Utc::now());
    let view = query.view.unwrap_or_default();
    let members = buckets.view(view, &records);

    Ok(Json(RosterOverviewResponse {
        total: buckets.total,
        live_count: buckets.live_count(),
        expired_count: buckets.expired_count(),
        view,
        members,
    }))
}

/// Fetch one member by ID.
///
/// GET /api/v1/members/:id
pub async fn get_member(
    State(state): State<AppState>,
    operator: OperatorAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<MemberRecord>, ApiError> {
    let repo = MemberRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(operator.operator_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Member not found".to_string()))?;
    Ok(Json(entity.into()))
}

/// Intake request. Field names follow the stored-data contract; every
/// field defaults so required-field checks stay field-scoped instead of
/// failing deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub plan_id: Option<Uuid>,
    #[serde(default)]
    pub paid_amount: String,
    #[serde(default)]
    pub admission_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<MemberStatus>,
    #[serde(default)]
    pub seat_number: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
}

/// Create a member record through the intake form: derived fields (total,
/// due, expiry) are computed here, not trusted from the client.
///
/// POST /api/v1/members
pub async fn create_member(
    State(state): State<AppState>,
    operator: OperatorAuth,
    Json(request): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<MemberRecord>), ApiError> {
    let now = Utc::now();
    let members = MemberRepository::new(state.pool.clone());

    let mut form = IntakeForm::new(now);
    form.full_name = request.full_name;
    form.address = request.address;
    form.contact_number = request.contact_number;
    form.email = request.email;
    form.seat_number = request.seat_number;
    form.profile_image = request.profile_image;
    form.document = request.document;
    if let Some(status) = request.status {
        form.status = status;
    }

    // A manually picked expiry date is applied first; plan selection and
    // the admission date overwrite it through the derivation rules.
    if let Some(expiry) = request.expiry_date {
        form.set_expiry_date(expiry);
    }
    if let Some(plan_id) = request.plan_id {
        let plans = PlanRepository::new(state.pool.clone());
        let plan: PlanRecord = plans
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Plan not found".to_string()))?
            .into();
        form.select_plan(&plan);
    }
    if let Some(admission) = request.admission_date {
        form.set_admission_date(admission);
    }
    form.set_paid_amount(request.paid_amount);

    let id = form
        .submit(&members, Some(operator.operator_id), now)
        .await?;

    let created = members
        .find_by_id(operator.operator_id, id)
        .await?
        .ok_or_else(|| ApiError::Internal("Created member not found".to_string()))?;

    Ok((StatusCode::CREATED, Json(created.into())))
}
