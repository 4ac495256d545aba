//! Error types for the font-service call boundary
//!
//! Failure here is ordinary: a face may be missing, a table absent, a
//! platform call refused. These errors never cross the engine's public
//! surface—the engine logs them and returns the sentinel the caller
//! contract specifies (false, an empty bitmap, a zeroed box).

use thiserror::Error;

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// What a platform font-service call can report back.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The font face could not be created or is not available.
    #[error("font face unavailable")]
    FaceUnavailable,

    /// The service does not implement this entry point.
    #[error("operation not implemented")]
    NotImplemented,

    /// The underlying platform call failed.
    #[error("platform call failed: {0}")]
    Platform(String),
}

impl ServiceError {
    /// Shorthand for wrapping a platform diagnostic string.
    pub fn platform(msg: impl Into<String>) -> Self {
        ServiceError::Platform(msg.into())
    }
}
