//! Operator authentication routes.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use domain::models::Operator;
use persistence::repositories::OperatorRepository;
use shared::password::{hash_password, verify_password};

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub operator: Operator,
}

/// Register a new operator account.
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let password_hash =
        hash_password(&request.password).map_err(|e| ApiError::Internal(e.to_string()))?;

    let repo = OperatorRepository::new(state.pool.clone());
    let entity = repo
        .create(&request.email.to_lowercase(), &password_hash)
        .await?;

    info!(operator_id = %entity.id, "operator registered");

    let token = state
        .jwt
        .sign(entity.id)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            operator: entity.into(),
        }),
    ))
}

/// Log in with email and password.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let repo = OperatorRepository::new(state.pool.clone());
    let entity = repo
        .find_by_email(&request.email.to_lowercase())
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = verify_password(&request.password, &entity.password_hash)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    info!(operator_id = %entity.id, "operator logged in");

    let token = state
        .jwt
        .sign(entity.id)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(AuthResponse {
        token,
        operator: entity.into(),
    }))
}
