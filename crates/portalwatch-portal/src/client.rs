//! HTTP session against the portal
//!
//! One [`HttpSession`] is opened per check cycle. It owns a cookie store so
//! the ASP.NET session cookie set during login rides along on every fetch.

use crate::errors::{client_error, Result};
use crate::{fetch, login};
use async_trait::async_trait;
use portalwatch_core::config::{PortalCredentials, PortalSettings};
use portalwatch_core::model::Domain;
use portalwatch_core::{Portal, PortalSession};
use reqwest::Client;

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; ResultMonitor/1.0)";

/// Session factory bound to one portal configuration
#[derive(Debug, Clone)]
pub struct HttpPortal {
    settings: PortalSettings,
}

impl HttpPortal {
    pub fn new(settings: PortalSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PortalSettings {
        &self.settings
    }
}

impl Portal for HttpPortal {
    fn open_session(&self) -> Result<Box<dyn PortalSession>> {
        Ok(Box::new(HttpSession::new(self.settings.clone())?))
    }
}

/// Cookie-holding client plus the settings it was built from
#[derive(Debug)]
pub struct HttpSession {
    client: Client,
    settings: PortalSettings,
}

impl HttpSession {
    /// Build a fresh client with an empty cookie jar
    ///
    /// `read_timeout` bounds each whole request; `connect_timeout` bounds the
    /// TCP/TLS handshake.
    pub fn new(settings: PortalSettings) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.read_timeout)
            .build()
            .map_err(client_error)?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl PortalSession for HttpSession {
    async fn authenticate(&mut self, credentials: &PortalCredentials) -> Result<()> {
        login::authenticate(&self.client, &self.settings, credentials).await
    }

    async fn fetch(&mut self, domain: Domain) -> Result<String> {
        fetch::fetch_page(&self.client, &self.settings, domain).await
    }
}
