//! Key validation endpoint

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ValidateApiKeyRequest, ValidateApiKeyResponse};

/// POST /api/validate-api-key
///
/// Answers only whether the secret is known. Store failures surface as
/// errors, never as `valid: false`.
pub async fn validate_api_key(
    State(state): State<AppState>,
    Json(request): Json<ValidateApiKeyRequest>,
) -> Result<Json<ValidateApiKeyResponse>, ApiError> {
    let valid = state
        .api_key_service
        .validate(&request.secret)
        .await?;

    Ok(Json(ValidateApiKeyResponse { valid }))
}
