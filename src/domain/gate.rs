//! Gate flow: submit a candidate key, validate it once, show the outcome.

use crate::domain::api_key::normalize_secret;
use crate::domain::DomainError;

/// Final result of one gate attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Valid,
    Invalid,
}

impl GateOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Message shown on the protected page
    pub fn message(&self) -> &'static str {
        match self {
            Self::Valid => "Valid apikey, /protected can be accessed",
            Self::Invalid => "Invalid API Key",
        }
    }
}

/// State of a single gate attempt
#[derive(Clone, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Unsubmitted,
    Pending { candidate: String },
    Resolved(GateOutcome),
}

impl std::fmt::Debug for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsubmitted => write!(f, "Unsubmitted"),
            Self::Pending { .. } => write!(f, "Pending"),
            Self::Resolved(outcome) => write!(f, "Resolved({:?})", outcome),
        }
    }
}

impl GateState {
    /// Submit a candidate secret, starting a fresh attempt from any state
    pub fn submit(self, candidate: &str) -> Result<Self, DomainError> {
        let candidate = normalize_secret(candidate)?;

        Ok(Self::Pending {
            candidate: candidate.to_string(),
        })
    }

    /// Resolve a pending attempt with the validation result
    ///
    /// Errors of any kind resolve to `Invalid`; an attempt never stays pending.
    pub fn resolve(self, result: Result<bool, DomainError>) -> Result<Self, DomainError> {
        match self {
            Self::Pending { .. } => {
                let outcome = match result {
                    Ok(true) => GateOutcome::Valid,
                    Ok(false) | Err(_) => GateOutcome::Invalid,
                };
                Ok(Self::Resolved(outcome))
            }
            other => Err(DomainError::internal(format!(
                "Cannot resolve a gate attempt in state {:?}",
                other
            ))),
        }
    }

    /// The candidate secret while the attempt is pending
    pub fn candidate(&self) -> Option<&str> {
        match self {
            Self::Pending { candidate } => Some(candidate),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<GateOutcome> {
        match self {
            Self::Resolved(outcome) => Some(*outcome),
            _ => None,
        }
    }
}
