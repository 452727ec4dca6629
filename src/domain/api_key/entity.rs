//! API Key entity and related types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::mask::mask_secret;
use super::validation::ApiKeyValidationError;

/// API Key identifier, assigned by the key store at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeyId(Uuid);

impl ApiKeyId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for ApiKeyId {
    type Err = ApiKeyValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ApiKeyValidationError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Data for a key that has not been persisted yet
///
/// The store assigns `id` and `created_at` and starts `usage_count` at zero.
#[derive(Clone, PartialEq, Eq)]
pub struct NewApiKey {
    pub name: String,
    pub secret: String,
    pub usage_limit: Option<u64>,
}

impl fmt::Debug for NewApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewApiKey")
            .field("name", &self.name)
            .field("secret", &mask_secret(&self.secret))
            .field("usage_limit", &self.usage_limit)
            .finish()
    }
}

/// Requested changes to an existing key
///
/// Blank values are treated as not supplied. Stores write only the fields
/// that are set and leave the others as they are.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKeyChanges {
    pub name: Option<String>,
    pub secret: Option<String>,
}

impl ApiKeyChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.secret.is_none()
    }
}

impl fmt::Debug for ApiKeyChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyChanges")
            .field("name", &self.name)
            .field("secret", &self.secret.as_deref().map(mask_secret))
            .finish()
    }
}

/// API Key entity
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    id: ApiKeyId,
    /// Display name for the key
    name: String,
    /// The bearer token itself
    secret: String,
    /// Maintained outside this service, display-only here
    usage_count: u64,
    /// Advisory ceiling, never enforced
    usage_limit: Option<u64>,
    created_at: DateTime<Utc>,
}

impl ApiKey {
    /// Rebuild a key from stored fields
    pub fn from_parts(
        id: ApiKeyId,
        name: impl Into<String>,
        secret: impl Into<String>,
        usage_count: u64,
        usage_limit: Option<u64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            secret: secret.into(),
            usage_count,
            usage_limit,
            created_at,
        }
    }

    /// Materialize a new key with store-assigned identity
    pub fn from_new(id: ApiKeyId, new_key: NewApiKey, created_at: DateTime<Utc>) -> Self {
        Self::from_parts(
            id,
            new_key.name,
            new_key.secret,
            0,
            new_key.usage_limit,
            created_at,
        )
    }

    // Getters

    pub fn id(&self) -> &ApiKeyId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn masked_secret(&self) -> String {
        mask_secret(&self.secret)
    }

    pub fn usage_count(&self) -> u64 {
        self.usage_count
    }

    pub fn usage_limit(&self) -> Option<u64> {
        self.usage_limit
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // Mutators

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the secret (explicit rotation or overwrite)
    pub fn set_secret(&mut self, secret: impl Into<String>) {
        self.secret = secret.into();
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &self.masked_secret())
            .field("usage_count", &self.usage_count)
            .field("usage_limit", &self.usage_limit)
            .field("created_at", &self.created_at)
            .finish()
    }
}
