use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Caller-supplied data failed a precondition
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        /// Request field at fault, when one can be named
        field: Option<String>,
    },

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        code: Option<String>,
    },

    /// The key store rejected or failed the operation
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        /// Store-reported error code, e.g. a SQLSTATE
        code: Option<String>,
    },

    /// The key store could not be reached at all
    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Validation failure attributed to one request field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            code: None,
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            code: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Attach a store-reported code; other categories are returned as-is
    pub fn with_code(self, code: impl Into<String>) -> Self {
        match self {
            Self::Conflict { message, .. } => Self::Conflict {
                message,
                code: Some(code.into()),
            },
            Self::Storage { message, .. } => Self::Storage {
                message,
                code: Some(code.into()),
            },
            other => other,
        }
    }

    /// The bare message, without the category prefix of `Display`
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message }
            | Self::Validation { message, .. }
            | Self::Conflict { message, .. }
            | Self::Storage { message, .. }
            | Self::Transport { message }
            | Self::Configuration { message }
            | Self::Internal { message } => message,
        }
    }
}
