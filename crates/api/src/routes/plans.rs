//! Plan management routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::{CreatePlanInput, PlanRecord};
use persistence::repositories::PlanRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::OperatorAuth;

/// Create a plan.
///
/// POST /api/v1/plans
pub async fn create_plan(
    State(state): State<AppState>,
    _operator: OperatorAuth,
    Json(input): Json<CreatePlanInput>,
) -> Result<(StatusCode, Json<PlanRecord>), ApiError> {
    input.validate()?;

    let repo = PlanRepository::new(state.pool.clone());
    let entity = repo.insert(&input).await?;

    info!(plan_id = %entity.id, name = %entity.name, "plan created");

    Ok((StatusCode::CREATED, Json(entity.into())))
}

/// List all plans, newest first.
///
/// GET /api/v1/plans
pub async fn list_plans(
    State(state): State<AppState>,
    _operator: OperatorAuth,
) -> Result<Json<Vec<PlanRecord>>, ApiError> {
    let repo = PlanRepository::new(state.pool.clone());
    let plans = repo.list().await?.into_iter().map(Into::into).collect();
    Ok(Json(plans))
}

/// Fetch one plan by ID.
///
/// GET /api/v1/plans/:id
pub async fn get_plan(
    State(state): State<AppState>,
    _operator: OperatorAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<PlanRecord>, ApiError> {
    let repo = PlanRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Plan not found".to_string()))?;
    Ok(Json(entity.into()))
}
