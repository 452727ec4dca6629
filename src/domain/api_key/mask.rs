//! Display masking for secrets

/// Shown in place of secrets too short to partially reveal
pub const FULL_MASK: &str = "••••••••";

/// Fixed suffix that replaces everything after the visible prefix
pub const MASKED_SUFFIX: &str = "-***********";

/// Number of leading characters left visible
pub const VISIBLE_PREFIX_CHARS: usize = 4;

const MIN_PARTIAL_MASK_LENGTH: usize = 9;

/// Mask a secret for display
///
/// Secrets of 8 characters or fewer are fully masked. Longer secrets keep
/// their first 4 characters and lose the rest to a fixed-length suffix, so
/// the masked form never leaks the secret's length.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() < MIN_PARTIAL_MASK_LENGTH {
        return FULL_MASK.to_string();
    }

    let prefix: String = secret.chars().take(VISIBLE_PREFIX_CHARS).collect();
    format!("{}{}", prefix, MASKED_SUFFIX)
}
