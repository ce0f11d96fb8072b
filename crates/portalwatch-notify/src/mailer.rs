//! SMTP notifier

use crate::errors::{address_error, notification_error, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use portalwatch_core::config::EmailSettings;
use portalwatch_core::diff::ChangeReport;
use portalwatch_core::model::SnapshotReport;
use portalwatch_core::render::{
    render_login_email, render_snapshot_email, render_update_email, EmailContent,
};
use portalwatch_core::{log_op_end, log_op_error, log_op_start, Notifier};
use std::fmt::Display;
use std::time::{Duration, Instant};

/// Upper bound for one SMTP conversation
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Port on which the SMTP server expects TLS from the first byte
const IMPLICIT_TLS_PORT: u16 = 465;

/// Local wall-clock time as printed in email bodies
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Notifier over any lettre async transport
#[derive(Debug)]
pub struct MailNotifier<T> {
    transport: T,
    from: Mailbox,
    to: Mailbox,
}

/// The production notifier
pub type SmtpNotifier = MailNotifier<AsyncSmtpTransport<Tokio1Executor>>;

impl<T> MailNotifier<T> {
    /// Wrap an existing transport; the envelope addresses come from `email`
    pub fn with_transport(transport: T, email: &EmailSettings) -> Result<Self> {
        let from = email
            .sender
            .parse::<Mailbox>()
            .map_err(|e| address_error("EMAIL_SENDER", &email.sender, e))?;
        let to = email
            .recipient
            .parse::<Mailbox>()
            .map_err(|e| address_error("EMAIL_RECIPIENT", &email.recipient, e))?;
        Ok(Self { transport, from, to })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Plain-text message for the configured sender and recipient
    pub fn build_message(&self, content: &EmailContent) -> Result<Message> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(content.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(content.body.clone())
            .map_err(|e| notification_error("build_message", e.to_string()))
    }
}

impl SmtpNotifier {
    /// Authenticated SMTP notifier
    ///
    /// Port 465 uses implicit TLS; any other port connects in plain text and
    /// upgrades with STARTTLS.
    pub fn smtp(email: &EmailSettings) -> Result<Self> {
        let builder = if email.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&email.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&email.smtp_host)
        }
        .map_err(|e| notification_error("build_transport", e.to_string()))?;

        let transport = builder
            .port(email.smtp_port)
            .credentials(Credentials::new(
                email.smtp_user.clone(),
                email.smtp_password.expose().clone(),
            ))
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Self::with_transport(transport, email)
    }
}

impl<T> MailNotifier<T>
where
    T: AsyncTransport + Send + Sync,
    T::Error: Display,
{
    async fn deliver(&self, content: EmailContent) -> Result<()> {
        let start = Instant::now();
        log_op_start!("send_email", subject = %content.subject);

        let result = match self.build_message(&content) {
            Ok(message) => self
                .transport
                .send(message)
                .await
                .map(|_| ())
                .map_err(|e| {
                    notification_error(
                        "send_email",
                        format!("Failed to send notification: {}", e),
                    )
                }),
            Err(e) => Err(e),
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(()) => {
                log_op_end!("send_email", duration_ms = duration_ms, subject = %content.subject);
            }
            Err(e) => {
                log_op_error!("send_email", e, duration_ms = duration_ms, subject = %content.subject);
            }
        }
        result
    }
}

#[async_trait]
impl<T> Notifier for MailNotifier<T>
where
    T: AsyncTransport + Send + Sync,
    T::Error: Display,
{
    async fn notify_changes(&self, report: &ChangeReport) -> Result<()> {
        self.deliver(render_update_email(report, &timestamp_now()))
            .await
    }

    async fn send_snapshot(&self, report: &SnapshotReport) -> Result<()> {
        self.deliver(render_snapshot_email(report, &timestamp_now()))
            .await
    }

    async fn notify_login(&self) -> Result<()> {
        self.deliver(render_login_email(&timestamp_now())).await
    }
}
