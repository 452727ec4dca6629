//! API Key generation
//!
//! Generates recognizable, cryptographically secure API keys.

use rand::RngCore;
use rand::rngs::OsRng;

use crate::domain::DomainError;

/// Default prefix for all generated keys
pub const DEFAULT_KEY_PREFIX: &str = "dnd-";

/// Bytes of entropy drawn per key
pub const KEY_ENTROPY_BYTES: usize = 32;

/// Hex characters kept after the prefix
pub const KEY_HEX_LENGTH: usize = 32;

/// Generator for secure API keys
#[derive(Debug, Clone)]
pub struct ApiKeyGenerator {
    /// Prefix for all generated keys (e.g., "dnd-")
    prefix: String,
}

impl ApiKeyGenerator {
    /// Create a new API key generator
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Generate a new API key
    ///
    /// Entropy comes from the operating system. If it cannot be read the
    /// error is returned; there is no weaker fallback.
    pub fn generate(&self) -> Result<String, DomainError> {
        let mut random_bytes = [0u8; KEY_ENTROPY_BYTES];
        OsRng
            .try_fill_bytes(&mut random_bytes)
            .map_err(|e| DomainError::internal(format!("Entropy source failure: {}", e)))?;

        let mut encoded = hex::encode(random_bytes);
        encoded.truncate(KEY_HEX_LENGTH);

        Ok(format!("{}{}", self.prefix, encoded))
    }
}

impl Default for ApiKeyGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX)
    }
}

/// Constant-time string comparison to prevent timing attacks
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_key() {
        let generator = ApiKeyGenerator::default();
        let key = generator.generate().unwrap();

        assert!(key.starts_with("dnd-"));
        assert_eq!(key.len(), "dnd-".len() + KEY_HEX_LENGTH);
    }

    #[test]
    fn test_generated_body_is_lowercase_hex() {
        let key = ApiKeyGenerator::default().generate().unwrap();
        let body = &key["dnd-".len()..];

        assert!(body.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generate_custom_prefix() {
        let generator = ApiKeyGenerator::new("test_");
        let key = generator.generate().unwrap();

        assert!(key.starts_with("test_"));
        assert_eq!(key.len(), "test_".len() + KEY_HEX_LENGTH);
    }

    #[test]
    fn test_key_uniqueness() {
        let generator = ApiKeyGenerator::default();
        let keys: std::collections::HashSet<String> =
            (0..100).map(|_| generator.generate().unwrap()).collect();

        assert_eq!(keys.len(), 100);
    }

    #[test]
    fn test_length_is_stable() {
        let generator = ApiKeyGenerator::default();
        let lengths: std::collections::HashSet<usize> =
            (0..20).map(|_| generator.generate().unwrap().len()).collect();

        assert_eq!(lengths.len(), 1);
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hell"));
        assert!(constant_time_compare("", ""));
    }
}
