//! Error handling for digest computation and backend dispatch

use thiserror::Error;

/// Hashing-specific errors
///
/// Everything here is a contract violation rather than an environmental
/// fault: nothing is retried and nothing is swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// Input length does not match what the operation requires
    #[error("Invalid input length: expected {expected} bytes, got {actual}")]
    InvalidInputLength {
        /// Length the operation accepts
        expected: usize,
        /// Length the caller passed
        actual: usize,
    },

    /// Compression input that is not a whole number of blocks
    #[error("Compression input must be a multiple of {block_size} bytes, got {actual}")]
    PartialBlock {
        /// Block size of the compression function
        block_size: usize,
        /// Length the caller passed
        actual: usize,
    },

    /// Backend name that does not correspond to any known backend
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    /// Backend forced by configuration that the capabilities do not allow
    #[error("Backend {backend} is not supported by the configured capabilities")]
    UnsupportedBackend {
        /// Name of the rejected backend
        backend: &'static str,
    },

    /// The process-wide dispatcher was already resolved
    #[error("Dispatch configuration already resolved")]
    AlreadyResolved,

    /// Malformed configuration value
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Internal defect. Never caused by caller input.
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl HashError {
    /// Create an invariant violation error
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether the error signals a library defect rather than misuse
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

/// Result type for hashing operations
pub type Result<T> = std::result::Result<T, HashError>;
