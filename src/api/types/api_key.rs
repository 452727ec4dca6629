//! Request and response bodies for the key endpoints

use serde::{Deserialize, Serialize};

use crate::domain::api_key::{ApiKey, ApiKeyChanges};

/// Request to create a new API key
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "usage_limit")]
    pub usage_limit: Option<u64>,
}

/// Request to update an API key
///
/// `key` is accepted as an alias for `secret`.
#[derive(Clone, Default, Deserialize)]
pub struct UpdateApiKeyRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "key")]
    pub secret: Option<String>,
}

impl std::fmt::Debug for UpdateApiKeyRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateApiKeyRequest")
            .field("name", &self.name)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl From<UpdateApiKeyRequest> for ApiKeyChanges {
    fn from(request: UpdateApiKeyRequest) -> Self {
        Self {
            name: request.name,
            secret: request.secret,
        }
    }
}

/// API key as returned by every key endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    pub id: String,
    pub name: String,
    pub secret: String,
    pub masked_secret: String,
    pub usage_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u64>,
    pub created_at: String,
}

impl From<&ApiKey> for ApiKeyResponse {
    fn from(key: &ApiKey) -> Self {
        Self {
            id: key.id().to_string(),
            name: key.name().to_string(),
            secret: key.secret().to_string(),
            masked_secret: key.masked_secret(),
            usage_count: key.usage_count(),
            usage_limit: key.usage_limit(),
            created_at: key.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteApiKeyResponse {
    pub success: bool,
    /// False when the key was already absent
    pub deleted: bool,
}

/// Request to check a candidate secret
#[derive(Clone, Default, Deserialize)]
pub struct ValidateApiKeyRequest {
    #[serde(default, alias = "apiKey", alias = "api_key")]
    pub secret: String,
}

impl std::fmt::Debug for ValidateApiKeyRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidateApiKeyRequest")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateApiKeyResponse {
    pub valid: bool,
}
