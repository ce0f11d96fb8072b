//! Error handling for portalwatch-store
//!
//! Wraps portalwatch-core PwError with store-specific helpers

use portalwatch_core::errors::{ErrorKind, PwError};
use portalwatch_core::model::Domain;

/// Result type alias using PwError
pub type Result<T> = std::result::Result<T, PwError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> PwError {
    PwError::new(ErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a snapshot write error, keeping the underlying cause
pub fn save_failed(domain: Domain, cause: PwError) -> PwError {
    PwError::new(ErrorKind::Persistence)
        .with_op("save_snapshot")
        .with_domain(domain.as_str())
        .with_message(format!("Failed to persist {} snapshot", domain))
        .with_source(cause)
}
