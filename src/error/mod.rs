//! Error types for Lettrics.

pub mod unified;

pub use unified::ErrorCategory;

use thiserror::Error;

/// Primary error type for all Lettrics operations.
#[derive(Error, Debug)]
pub enum LettricsError {
    #[error("Missing required fields: {}", .fields.join(", "))]
    Validation { fields: Vec<String> },

    #[error("Unsupported tool: {0}")]
    UnsupportedTool(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Remote generation failed: {0}")]
    Remote(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Generation cancelled")]
    Cancelled,

    #[error("History store error: {0}")]
    History(String),
}

impl LettricsError {
    /// Create a validation error for the given absent fields.
    pub fn missing<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an API error from a non-success HTTP status.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } | Self::UnsupportedTool(_) | Self::InvalidRequest(_) => {
                ErrorCategory::Validation
            }
            Self::Api { .. }
            | Self::Remote(_)
            | Self::MalformedResponse(_)
            | Self::Network(_)
            | Self::Cancelled => ErrorCategory::Remote,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Io(_) | Self::History(_) => ErrorCategory::Storage,
            Self::Serialization(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether this error must be reported to the caller instead of
    /// being replaced by fallback content.
    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    /// Whether this error came from the remote generation boundary.
    pub fn is_remote_failure(&self) -> bool {
        self.category() == ErrorCategory::Remote
    }

    /// Names of the absent fields, empty for every other variant.
    pub fn missing_fields(&self) -> &[String] {
        match self {
            Self::Validation { fields } => fields,
            _ => &[],
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LettricsError>;
