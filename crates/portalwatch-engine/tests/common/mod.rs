//! In-memory collaborators shared by the engine tests

#![allow(dead_code)]

use async_trait::async_trait;
use portalwatch_core::config::PortalCredentials;
use portalwatch_core::core_types::Sensitive;
use portalwatch_core::diff::ChangeReport;
use portalwatch_core::errors::{ErrorKind, PwError, Result};
use portalwatch_core::model::{Domain, Record, Snapshot, SnapshotReport};
use portalwatch_core::{Notifier, Portal, PortalSession, RecordParser};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub fn credentials() -> PortalCredentials {
    PortalCredentials {
        roll_number: "21z201".to_string(),
        password: Sensitive::new("secret".to_string()),
    }
}

pub fn result(semester: &str, code: &str, grade: &str) -> Record {
    [
        ("semester", semester),
        ("course_code", code),
        ("course_title", "Course"),
        ("grade", grade),
        ("result", "Pass"),
    ]
    .into_iter()
    .collect()
}

pub fn attendance(key: &str, present: &str) -> Record {
    [("_key", key), ("course_code", key), ("present", present)]
        .into_iter()
        .collect()
}

pub fn fetch_failure(domain: Domain) -> PwError {
    PwError::new(ErrorKind::Fetch)
        .with_op("fetch_page")
        .with_domain(domain.as_str())
        .with_message(format!("Failed to fetch {} page: HTTP 500", domain))
}

#[derive(Default)]
struct PortalState {
    login_error: Option<PwError>,
    pages: HashMap<Domain, std::result::Result<Snapshot, PwError>>,
    fetches: Vec<Domain>,
    sessions: usize,
}

/// Portal whose pages are JSON-encoded snapshots
#[derive(Clone, Default)]
pub struct FakePortal {
    state: Arc<Mutex<PortalState>>,
}

impl FakePortal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_page(&self, domain: Domain, records: Snapshot) {
        self.state.lock().unwrap().pages.insert(domain, Ok(records));
    }

    pub fn fail_page(&self, domain: Domain) {
        self.state
            .lock()
            .unwrap()
            .pages
            .insert(domain, Err(fetch_failure(domain)));
    }

    pub fn fail_login(&self) {
        self.state.lock().unwrap().login_error = Some(
            PwError::new(ErrorKind::Login)
                .with_op("authenticate")
                .with_message("Portal rejected the provided credentials."),
        );
    }

    pub fn fetches(&self) -> Vec<Domain> {
        self.state.lock().unwrap().fetches.clone()
    }

    pub fn sessions(&self) -> usize {
        self.state.lock().unwrap().sessions
    }
}

impl Portal for FakePortal {
    fn open_session(&self) -> Result<Box<dyn PortalSession>> {
        self.state.lock().unwrap().sessions += 1;
        Ok(Box::new(FakeSession {
            state: Arc::clone(&self.state),
        }))
    }
}

struct FakeSession {
    state: Arc<Mutex<PortalState>>,
}

#[async_trait]
impl PortalSession for FakeSession {
    async fn authenticate(&mut self, _credentials: &PortalCredentials) -> Result<()> {
        match &self.state.lock().unwrap().login_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn fetch(&mut self, domain: Domain) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.fetches.push(domain);
        match state.pages.get(&domain) {
            Some(Ok(records)) => Ok(serde_json::to_string(records).unwrap()),
            Some(Err(err)) => Err(err.clone()),
            None => Err(fetch_failure(domain)),
        }
    }
}

/// Parser for the JSON pages served by [`FakePortal`]; `"garbage"` fails
pub struct JsonParser;

impl RecordParser for JsonParser {
    fn parse(&self, domain: Domain, html: &str) -> Result<Snapshot> {
        serde_json::from_str(html).map_err(|e| {
            PwError::new(ErrorKind::Parse)
                .with_domain(domain.as_str())
                .with_message(e.to_string())
        })
    }
}

#[derive(Default)]
struct NotifierState {
    changes: Vec<ChangeReport>,
    snapshots: Vec<SnapshotReport>,
    logins: usize,
    fail: bool,
}

/// Notifier that records what it was asked to send
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    state: Arc<Mutex<NotifierState>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, fail: bool) {
        self.state.lock().unwrap().fail = fail;
    }

    pub fn sent_changes(&self) -> Vec<ChangeReport> {
        self.state.lock().unwrap().changes.clone()
    }

    pub fn sent_snapshots(&self) -> Vec<SnapshotReport> {
        self.state.lock().unwrap().snapshots.clone()
    }

    pub fn logins(&self) -> usize {
        self.state.lock().unwrap().logins
    }

    fn check(&self) -> Result<()> {
        if self.state.lock().unwrap().fail {
            Err(PwError::new(ErrorKind::Notification)
                .with_op("send_email")
                .with_message("Failed to send notification: connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_changes(&self, report: &ChangeReport) -> Result<()> {
        self.check()?;
        self.state.lock().unwrap().changes.push(report.clone());
        Ok(())
    }

    async fn send_snapshot(&self, report: &SnapshotReport) -> Result<()> {
        self.check()?;
        self.state.lock().unwrap().snapshots.push(report.clone());
        Ok(())
    }

    async fn notify_login(&self) -> Result<()> {
        self.check()?;
        self.state.lock().unwrap().logins += 1;
        Ok(())
    }
}
