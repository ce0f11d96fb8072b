//! Error handling for portalwatch-notify

use portalwatch_core::errors::{ErrorKind, PwError};

/// Result type alias using PwError
pub type Result<T> = std::result::Result<T, PwError>;

/// Create a notification error
pub fn notification_error(operation: &str, message: impl Into<String>) -> PwError {
    PwError::new(ErrorKind::Notification)
        .with_op(operation.to_string())
        .with_message(message)
}

/// Create an error for an unusable envelope address
pub fn address_error(variable: &str, value: &str, reason: impl std::fmt::Display) -> PwError {
    PwError::new(ErrorKind::Config)
        .with_op("build_notifier")
        .with_message(format!("{}: invalid address '{}': {}", variable, value, reason))
}
