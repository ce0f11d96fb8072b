//! Plain-text rendering for notification emails
//!
//! Rendering is kept free of I/O so the exact email text can be asserted in
//! tests; the SMTP notifier only adds headers and transport.

pub mod email_render;
pub mod snapshot_render;

pub use email_render::{
    render_login_email, render_snapshot_email, render_update_email, EmailContent,
};
pub use snapshot_render::render_snapshot_records;
