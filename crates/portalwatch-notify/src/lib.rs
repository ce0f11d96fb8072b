//! PortalWatch Notify - email delivery
//!
//! Renders change reports and snapshots with `portalwatch_core::render` and
//! sends them over authenticated SMTP. The transport is generic so tests can
//! swap in lettre's stub transport.

pub mod errors;
pub mod mailer;

pub use errors::Result;
pub use mailer::{timestamp_now, MailNotifier, SmtpNotifier, SMTP_TIMEOUT};
