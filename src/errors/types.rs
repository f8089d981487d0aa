//! # Error Types
//!
//! Crate-wide error types using `thiserror`.

/// Custom result type for rotation service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the rotation service
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors (missing or empty required settings)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Request validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Resource not found errors
    #[error("Resource not found: {resource_type} with ID '{id}'")]
    NotFound { resource_type: String, id: String },

    /// The identity provider created no usable secret value
    #[error("Credential issuance failed: {message}")]
    Issuance { message: String },

    /// The vault write did not complete
    #[error("Secret persistence failed: {message}")]
    Persistence { message: String },

    /// Network transport errors (HTTP to either remote system)
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into() }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, I: Into<String>>(resource_type: R, id: I) -> Self {
        Self::NotFound { resource_type: resource_type.into(), id: id.into() }
    }

    /// Create an issuance error
    pub fn issuance<S: Into<String>>(message: S) -> Self {
        Self::Issuance { message: message.into() }
    }

    /// Create a persistence error
    pub fn persistence<S: Into<String>>(message: S) -> Self {
        Self::Persistence { message: message.into() }
    }

    /// Create a transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport { message: message.into() }
    }

    /// Get the HTTP status code that should be returned for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Config { .. } => 500,
            Error::Validation { .. } => 400,
            Error::NotFound { .. } => 404,
            Error::Issuance { .. } => 502,
            Error::Persistence { .. } => 502,
            Error::Transport { .. } => 502,
            Error::Serialization(_) => 400,
            Error::Io(_) => 500,
        }
    }

    /// Check if this error should be retried
    ///
    /// Configuration and validation problems never resolve on their own; a
    /// failed remote call can, and both issuance and persistence are safe to
    /// replay (issuance is additive, the vault write overwrites by name).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Issuance { .. }
                | Error::Persistence { .. }
                | Error::Transport { .. }
                | Error::Io(_)
        )
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string())
                    })
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::validation(format!("Validation failed: {}", message))
    }
}
