//! Shared error type across authgate crates.

use thiserror::Error;

/// Stable error codes used in structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid or inconsistent configuration.
    Config,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Backing-store driver name not recognised.
    UnsupportedDriver,
    /// Backing store could not be read or written.
    Store,
    /// Policy engine could not be built or evaluated.
    Engine,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::UnsupportedDriver => "UNSUPPORTED_DRIVER",
            ErrorCode::Store => "STORE",
            ErrorCode::Engine => "ENGINE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, AuthgateError>;

/// Unified error type used by core and gateway.
///
/// None of these ever reach an HTTP client: the gate's only user-facing
/// failure is the fixed 403 body.
#[derive(Debug, Error)]
pub enum AuthgateError {
    #[error("invalid config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("unsupported store driver: {0}")]
    UnsupportedDriver(String),
    #[error("policy store: {0}")]
    Store(String),
    #[error("policy engine: {0}")]
    Engine(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl AuthgateError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthgateError::Config(_) => ErrorCode::Config,
            AuthgateError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            AuthgateError::UnsupportedDriver(_) => ErrorCode::UnsupportedDriver,
            AuthgateError::Store(_) => ErrorCode::Store,
            AuthgateError::Engine(_) => ErrorCode::Engine,
            AuthgateError::Internal(_) => ErrorCode::Internal,
        }
    }
}
