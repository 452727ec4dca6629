//! Domain layer - Core business logic and entities

pub mod api_key;
pub mod diagnostics;
pub mod error;
pub mod gate;

pub use api_key::{
    ApiKey, ApiKeyChanges, ApiKeyId, ApiKeyRepository, ApiKeyValidationError, NewApiKey,
};
pub use diagnostics::StoreProbe;
pub use error::DomainError;
pub use gate::{GateOutcome, GateState};
