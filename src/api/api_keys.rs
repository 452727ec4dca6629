//! API key management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, ApiKeyResponse, CreateApiKeyRequest, DeleteApiKeyResponse, Json,
    UpdateApiKeyRequest,
};

/// GET /api/api-keys
pub async fn list_api_keys(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApiKeyResponse>>, ApiError> {
    debug!("Listing API keys");

    let keys = state.api_key_service.list().await?;

    Ok(Json(keys.iter().map(ApiKeyResponse::from).collect()))
}

/// POST /api/api-keys
pub async fn create_api_key(
    State(state): State<AppState>,
    Json(request): Json<CreateApiKeyRequest>,
) -> Result<(StatusCode, Json<ApiKeyResponse>), ApiError> {
    let created = state
        .api_key_service
        .create(&request.name, request.usage_limit)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiKeyResponse::from(&created))))
}

/// GET /api/api-keys/{id}
pub async fn get_api_key(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    let key = state.api_key_service.get(&id).await?;

    Ok(Json(ApiKeyResponse::from(&key)))
}

/// PATCH /api/api-keys/{id}
pub async fn update_api_key(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateApiKeyRequest>,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    debug!("Updating API key: id={}, request={:?}", id, request);

    let updated = state.api_key_service.update(&id, request.into()).await?;

    Ok(Json(ApiKeyResponse::from(&updated)))
}

/// POST /api/api-keys/{id}/rotate
pub async fn rotate_api_key(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    let rotated = state.api_key_service.rotate(&id).await?;

    Ok(Json(ApiKeyResponse::from(&rotated)))
}

/// DELETE /api/api-keys/{id}
pub async fn delete_api_key(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteApiKeyResponse>, ApiError> {
    let deleted = state.api_key_service.delete(&id).await?;

    Ok(Json(DeleteApiKeyResponse {
        success: true,
        deleted,
    }))
}
