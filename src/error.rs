//! Error types for the PPA statistics tool

use thiserror::Error;

/// Result type alias for PPA statistics operations
pub type Result<T> = std::result::Result<T, PpaStatsError>;

/// Main error type for the PPA statistics tool
#[derive(Error, Debug)]
pub enum PpaStatsError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// TOML rendering failed
    #[error("TOML serialization failed: {0}")]
    TomlError(#[from] toml::ser::Error),

    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Anonymous login was rejected
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Archive lookup returned nothing
    #[error("Archive '~{owner}/{name}' not found")]
    ArchiveNotFound { owner: String, name: String },

    /// Any other resource missing on the API side
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API rate limit exceeded
    #[error("API rate limit exceeded. Please try again later")]
    RateLimitExceeded,

    /// Server error from the Launchpad API
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Response body had an unexpected shape
    #[error("Unexpected API response: {0}")]
    UnexpectedResponse(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Service unavailable
    #[error("Service temporarily unavailable: {0}")]
    ServiceUnavailable(String),
}

impl PpaStatsError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::ValidationError(message.into())
    }

    /// Create a new unexpected-response error
    pub fn unexpected<S: Into<String>>(message: S) -> Self {
        Self::UnexpectedResponse(message.into())
    }

    /// Get the HTTP status code if this error represents an HTTP error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            Self::ArchiveNotFound { .. } | Self::NotFound(_) => Some(404),
            Self::RateLimitExceeded => Some(429),
            Self::AuthError(_) => Some(401),
            Self::ServiceUnavailable(_) => Some(503),
            _ => None,
        }
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::ArchiveNotFound { owner, name } => {
                format!("The PPA '{}' of '{}' does not exist on Launchpad", name, owner)
            }
            Self::AuthError(_) => {
                "Launchpad refused the anonymous login. Check the service root and consumer name."
                    .to_string()
            }
            Self::RateLimitExceeded => {
                "You've exceeded the API rate limit. Please wait a moment before trying again."
                    .to_string()
            }
            Self::ServiceUnavailable(_) => {
                "The Launchpad API is temporarily unavailable. Please try again later.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Convert reqwest status codes to appropriate errors
impl From<reqwest::StatusCode> for PpaStatsError {
    fn from(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            401 | 403 => Self::AuthError(format!("Server returned {}", status)),
            404 => Self::NotFound("Resource not found".to_string()),
            429 => Self::RateLimitExceeded,
            500..=599 => Self::ServiceUnavailable(format!("Server error: {}", status)),
            _ => Self::ServerError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            },
        }
    }
}
