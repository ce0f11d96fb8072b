use crate::diff::human_summary::render_changes;
use crate::diff::model::ChangeReport;
use crate::model::{Domain, DomainCapture, SnapshotReport};
use crate::render::snapshot_render::render_snapshot_records;

pub const UPDATE_SUBJECT: &str = "Attendance/results updated";
pub const SNAPSHOT_SUBJECT: &str = "Portal Snapshot";
pub const LOGIN_SUBJECT: &str = "Portal Login Successful";

/// Subject and plain-text body of one outgoing email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

impl EmailContent {
    fn new(subject: &str, lines: Vec<String>) -> Self {
        Self {
            subject: subject.to_string(),
            body: format!("{}\n", lines.join("\n").trim()),
        }
    }
}

fn header(title: &str, timestamp: &str) -> Vec<String> {
    vec![
        title.to_string(),
        format!("Timestamp: {}", timestamp),
        String::new(),
    ]
}

/// The combined change notification covering both domains.
///
/// Results are listed first. A domain without changes gets a single
/// "none detected" line so the reader knows it was checked.
pub fn render_update_email(report: &ChangeReport, timestamp: &str) -> EmailContent {
    let mut lines = header("Attendance/results updated.", timestamp);

    for (domain, title) in [
        (Domain::Results, "Result changes"),
        (Domain::Attendance, "Attendance changes"),
    ] {
        let changes = report.for_domain(domain);
        if changes.is_empty() {
            lines.push(format!("{}: none detected during this run.", title));
            lines.push(String::new());
            continue;
        }
        lines.push(format!("{}:", title));
        lines.push(render_changes(domain, changes));
        lines.push(String::new());
    }

    EmailContent::new(UPDATE_SUBJECT, lines)
}

/// The one-shot email listing every parsed record of both domains.
pub fn render_snapshot_email(report: &SnapshotReport, timestamp: &str) -> EmailContent {
    let mut lines = header("Current portal snapshot.", timestamp);

    for (domain, title, noun) in [
        (Domain::Results, "Results", "result"),
        (Domain::Attendance, "Attendance", "attendance"),
    ] {
        lines.push(format!("{}:", title));
        match report.for_domain(domain) {
            DomainCapture::Failed(reason) => {
                lines.push(format!("  Failed to fetch {}: {}", domain, reason));
            }
            DomainCapture::Records(records) if records.is_empty() => {
                lines.push(format!("  No {} records were parsed.", noun));
            }
            DomainCapture::Records(records) => {
                lines.push(render_snapshot_records(
                    records,
                    domain == Domain::Attendance,
                ));
            }
        }
        lines.push(String::new());
    }

    EmailContent::new(SNAPSHOT_SUBJECT, lines)
}

/// Confirmation that the portal login worked.
pub fn render_login_email(timestamp: &str) -> EmailContent {
    EmailContent::new(
        LOGIN_SUBJECT,
        vec![
            "Login to the portal succeeded.".to_string(),
            format!("Timestamp: {}", timestamp),
        ],
    )
}
