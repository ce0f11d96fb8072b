//! Error handling for portalwatch-portal
//!
//! Maps transport failures onto the shared PwError taxonomy

use portalwatch_core::errors::{ErrorKind, PwError};
use portalwatch_core::model::Domain;

/// Result type alias using PwError
pub type Result<T> = std::result::Result<T, PwError>;

/// Create a page fetch error; timeouts keep their own kind
pub fn fetch_error(domain: Domain, err: reqwest::Error) -> PwError {
    let kind = if err.is_timeout() {
        ErrorKind::Timeout
    } else {
        ErrorKind::Fetch
    };
    PwError::new(kind)
        .with_op("fetch_page")
        .with_domain(domain.as_str())
        .with_message(format!("Failed to fetch {} page: {}", domain, err))
}

/// Create a login error from a failed request
///
/// Timeouts are reported as login failures too; the whole cycle aborts
/// either way.
pub fn login_request_error(step: &str, err: reqwest::Error) -> PwError {
    PwError::new(ErrorKind::Login)
        .with_op("authenticate")
        .with_message(format!("{} failed: {}", step, err))
}

/// Create a login error with a plain message
pub fn login_error(message: impl Into<String>) -> PwError {
    PwError::new(ErrorKind::Login)
        .with_op("authenticate")
        .with_message(message)
}

/// Create an error for a client that could not be built
pub fn client_error(err: reqwest::Error) -> PwError {
    PwError::new(ErrorKind::Internal)
        .with_op("open_session")
        .with_message(format!("Failed to build HTTP client: {}", err))
}
