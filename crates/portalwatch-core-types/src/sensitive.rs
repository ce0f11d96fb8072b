//! Redacting wrapper for credentials
//!
//! Portal passwords and SMTP credentials travel through configuration structs
//! that derive `Debug`. Wrapping them in `Sensitive<T>` keeps them out of
//! every log line and error message.

use std::fmt;

/// A value that prints as `***REDACTED***`
///
/// ```
/// use portalwatch_core_types::Sensitive;
///
/// let password = Sensitive::new("secret123");
/// assert_eq!(format!("{:?}", password), "***REDACTED***");
/// assert_eq!(password.expose(), &"secret123");
/// ```
#[derive(Clone)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// The wrapped value; only the login form and the SMTP handshake need it
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***REDACTED***")
    }
}
