//! Finance ledger routes and the members dashboard.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::{summarize, FinanceSummary, LedgerEntry, MemberRecord, NewLedgerEntry};
use domain::services::stats::{compute_dashboard, DashboardStats};
use persistence::repositories::{FinanceRepository, MemberRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::OperatorAuth;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerResponse {
    pub entries: Vec<LedgerEntry>,
    pub summary: FinanceSummary,
}

/// Create a ledger entry.
///
/// POST /api/v1/finance/entries
pub async fn create_entry(
    State(state): State<AppState>,
    operator: OperatorAuth,
    Json(input): Json<NewLedgerEntry>,
) -> Result<(StatusCode, Json<LedgerEntry>), ApiError> {
    input.validate()?;

    let repo = FinanceRepository::new(state.pool.clone());
    let entity = repo.insert(operator.operator_id, &input).await?;
    Ok((StatusCode::CREATED, Json(entity.into())))
}

/// The operator's ledger, newest first, with totals.
///
/// GET /api/v1/finance/entries
pub async fn list_entries(
    State(state): State<AppState>,
    operator: OperatorAuth,
) -> Result<Json<LedgerResponse>, ApiError> {
    let repo = FinanceRepository::new(state.pool.clone());
    let entries: Vec<LedgerEntry> = repo
        .list(operator.operator_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let summary = summarize(&entries);
    Ok(Json(LedgerResponse { entries, summary }))
}

/// Update a ledger entry.
///
/// PUT /api/v1/finance/entries/:id
pub async fn update_entry(
    State(state): State<AppState>,
    operator: OperatorAuth,
    Path(id): Path<Uuid>,
    Json(input): Json<NewLedgerEntry>,
) -> Result<Json<LedgerEntry>, ApiError> {
    input.validate()?;

    let repo = FinanceRepository::new(state.pool.clone());
    let entity = repo
        .update(operator.operator_id, id, &input)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ledger entry not found".to_string()))?;
    Ok(Json(entity.into()))
}

/// Delete a ledger entry.
///
/// DELETE /api/v1/finance/entries/:id
pub async fn delete_entry(
    State(state): State<AppState>,
    operator: OperatorAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = FinanceRepository::new(state.pool.clone());
    let deleted = repo.delete(operator.operator_id, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Ledger entry not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Dashboard stat cards: member counts and amount totals plus ledger
/// figures.
///
/// GET /api/v1/finance/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    operator: OperatorAuth,
) -> Result<Json<DashboardStats>, ApiError> {
    let members_repo = MemberRepository::new(state.pool.clone());
    let finance_repo = FinanceRepository::new(state.pool.clone());

    let members: Vec<MemberRecord> = members_repo
        .list_all(operator.operator_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let entries: Vec<LedgerEntry> = finance_repo
        .list(operator.operator_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(compute_dashboard(&members, &entries, Utc::now())))
}
