//! API key input validation

use thiserror::Error;

use crate::domain::DomainError;

/// Errors that can occur while validating API key input
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiKeyValidationError {
    #[error("Name is required")]
    EmptyName,

    #[error("Name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("API key is required")]
    EmptySecret,

    #[error("No valid updates provided")]
    NoUpdates,

    #[error("Usage limit exceeds maximum of {0}")]
    UsageLimitTooLarge(u64),

    #[error("Invalid API key ID: '{0}'")]
    InvalidId(String),
}

impl ApiKeyValidationError {
    /// Request field the error refers to, in wire naming
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::EmptyName | Self::NameTooLong(_) => Some("name"),
            Self::EmptySecret => Some("secret"),
            Self::UsageLimitTooLarge(_) => Some("usageLimit"),
            Self::NoUpdates | Self::InvalidId(_) => None,
        }
    }
}

impl From<ApiKeyValidationError> for DomainError {
    fn from(err: ApiKeyValidationError) -> Self {
        match err.field() {
            Some(field) => DomainError::invalid_field(field, err.to_string()),
            None => DomainError::validation(err.to_string()),
        }
    }
}

pub const MAX_NAME_LENGTH: usize = 255;

/// Largest usage limit every key store can hold (a signed 64-bit column)
pub const MAX_USAGE_LIMIT: u64 = i64::MAX as u64;

/// Trim a key name and check it is usable
///
/// Rules:
/// - Cannot be empty after trimming
/// - Maximum 255 characters
pub fn normalize_name(name: &str) -> Result<&str, ApiKeyValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ApiKeyValidationError::EmptyName);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ApiKeyValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(name)
}

/// Trim a secret and reject empty input
pub fn normalize_secret(secret: &str) -> Result<&str, ApiKeyValidationError> {
    let secret = secret.trim();

    if secret.is_empty() {
        return Err(ApiKeyValidationError::EmptySecret);
    }

    Ok(secret)
}

/// Reject usage limits no key store can represent
pub fn check_usage_limit(limit: Option<u64>) -> Result<Option<u64>, ApiKeyValidationError> {
    match limit {
        Some(limit) if limit > MAX_USAGE_LIMIT => {
            Err(ApiKeyValidationError::UsageLimitTooLarge(MAX_USAGE_LIMIT))
        }
        other => Ok(other),
    }
}

/// Treat blank optional input as not supplied
pub fn supplied(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
