//! API Key domain
//!
//! This module provides domain types and traits for API key management:
//! the key entity, the store contract, input validation and display masking.

mod entity;
mod mask;
mod repository;
mod validation;

pub use entity::{ApiKey, ApiKeyChanges, ApiKeyId, NewApiKey};
pub use mask::{mask_secret, FULL_MASK, MASKED_SUFFIX};
#[cfg(test)]
pub use repository::MockApiKeyRepository;
pub use repository::ApiKeyRepository;
pub use validation::{
    check_usage_limit, normalize_name, normalize_secret, supplied, ApiKeyValidationError,
    MAX_NAME_LENGTH, MAX_USAGE_LIMIT,
};
