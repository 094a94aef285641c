//! Seat pool routes: expansion and allotment.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use domain::models::{plan_expansion, SeatError, SeatRecord};
use persistence::repositories::{MemberRepository, SeatRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::OperatorAuth;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSeatsRequest {
    pub count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllotSeatRequest {
    pub member_id: Uuid,
}

/// Expand the operator's seat pool. Numbering continues from the current
/// pool size; the combined pool is capped.
///
/// POST /api/v1/seats
pub async fn add_seats(
    State(state): State<AppState>,
    operator: OperatorAuth,
    Json(request): Json<AddSeatsRequest>,
) -> Result<(StatusCode, Json<Vec<SeatRecord>>), ApiError> {
    let repo = SeatRepository::new(state.pool.clone());
    let existing = repo.count(operator.operator_id).await?;

    let numbers = plan_expansion(existing as usize, request.count)
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let seats: Vec<SeatRecord> = repo
        .insert_batch(operator.operator_id, &numbers)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    info!(
        operator_id = %operator.operator_id,
        added = seats.len(),
        "seat pool expanded"
    );

    Ok((StatusCode::CREATED, Json(seats)))
}

/// List the operator's seats in seat-number order.
///
/// GET /api/v1/seats
pub async fn list_seats(
    State(state): State<AppState>,
    operator: OperatorAuth,
) -> Result<Json<Vec<SeatRecord>>, ApiError> {
    let repo = SeatRepository::new(state.pool.clone());
    let seats = repo
        .list(operator.operator_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(seats))
}

/// Allocate a seat to a member. Allocating an already-taken seat is a
/// conflict, not an overwrite.
///
/// POST /api/v1/seats/:id/allot
pub async fn allot_seat(
    State(state): State<AppState>,
    operator: OperatorAuth,
    Path(seat_id): Path<Uuid>,
    Json(request): Json<AllotSeatRequest>,
) -> Result<Json<SeatRecord>, ApiError> {
    let members = MemberRepository::new(state.pool.clone());
    members
        .find_by_id(operator.operator_id, request.member_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Member not found".to_string()))?;

    let repo = SeatRepository::new(state.pool.clone());
    match repo
        .allot(operator.operator_id, seat_id, request.member_id)
        .await?
    {
        Some(seat) => {
            info!(
                seat_id = %seat.id,
                member_id = %request.member_id,
                "seat allocated"
            );
            Ok(Json(seat.into()))
        }
        None => {
            // Distinguish a missing seat from one that is already taken.
            match repo.find_by_id(operator.operator_id, seat_id).await? {
                Some(_) => Err(ApiError::Conflict(SeatError::AlreadyAllocated.to_string())),
                None => Err(ApiError::NotFound("Seat not found".to_string())),
            }
        }
    }
}
