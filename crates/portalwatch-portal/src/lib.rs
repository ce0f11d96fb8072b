//! PortalWatch Portal - talking to the student portal
//!
//! Provides:
//! - Cookie-holding HTTP session ([`HttpPortal`] / [`HttpSession`])
//! - ASP.NET login form submission
//! - Page fetching for results and attendance
//! - HTML table parsing into records ([`HtmlTableParser`])

pub mod client;
pub mod errors;
pub mod fetch;
pub mod login;
pub mod parser;

pub use client::{HttpPortal, HttpSession, USER_AGENT};
pub use errors::Result;
pub use parser::{parse_attendance, parse_results, HtmlTableParser};
