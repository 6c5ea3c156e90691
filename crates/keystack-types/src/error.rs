//! Keystack error types.

/// Errors returned by every fallible Keystack operation.
///
/// Verification failures are always reported as [`KeystackError::InvalidArgument`]
/// with a fixed message, whether or not any key matched the presented prefix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeystackError {
    /// Absent or malformed key material, disallowed parameters, missing
    /// primary, malformed input, or a failed cryptographic check.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No entry exists under the requested identifier or type URL.
    #[error("not found: {0}")]
    NotFound(String),

    /// A conflicting registration already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Broken internal invariant or unexpected backend failure.
    #[error("internal error: {0}")]
    Internal(String),

    /// Operation not supported for this key role or algorithm.
    #[error("unimplemented: {0}")]
    Unimplemented(String),
}

impl KeystackError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        KeystackError::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        KeystackError::NotFound(message.into())
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        KeystackError::AlreadyExists(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        KeystackError::Internal(message.into())
    }

    pub fn unimplemented(message: impl Into<String>) -> Self {
        KeystackError::Unimplemented(message.into())
    }

    /// The human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            KeystackError::InvalidArgument(m)
            | KeystackError::NotFound(m)
            | KeystackError::AlreadyExists(m)
            | KeystackError::Internal(m)
            | KeystackError::Unimplemented(m) => m,
        }
    }
}

pub type Result<T> = std::result::Result<T, KeystackError>;
