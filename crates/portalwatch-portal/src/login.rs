//! ASP.NET login form submission
//!
//! The portal login page is a WebForms postback: the form must echo back the
//! page's hidden state fields along with the credentials, and the session
//! cookie it sets is what authorises later page fetches.

use crate::client::USER_AGENT;
use crate::errors::{login_error, login_request_error, Result};
use crate::parser::selector;
use portalwatch_core::config::{PortalCredentials, PortalSettings};
use portalwatch_core::errors::FormError;
use reqwest::header;
use reqwest::{Client, StatusCode};
use scraper::Html;
use std::collections::BTreeMap;

/// Hidden inputs the postback must echo back
pub const HIDDEN_FIELDS: [&str; 3] = ["__VIEWSTATE", "__EVENTVALIDATION", "__VIEWSTATEGENERATOR"];

/// Login page URLs to try, in order: the bare base URL first, then the
/// configured login path when it names a different page
pub fn login_url_candidates(settings: &PortalSettings) -> Vec<String> {
    let mut urls = vec![settings.base_url.clone()];
    let path = settings.login_path.trim().trim_start_matches('/');
    if !path.is_empty() {
        let explicit = settings.url_for(path);
        if !urls.contains(&explicit) {
            urls.push(explicit);
        }
    }
    urls
}

/// Values of the hidden state inputs; every one must be present
pub fn extract_hidden_fields(html: &str) -> Result<BTreeMap<&'static str, String>> {
    let document = Html::parse_document(html);
    let inputs = selector("input")?;

    let mut fields = BTreeMap::new();
    for name in HIDDEN_FIELDS {
        let value = document
            .select(&inputs)
            .find(|input| input.value().attr("name") == Some(name))
            .and_then(|input| input.value().attr("value"))
            .ok_or_else(|| FormError::MissingHiddenField {
                field: name.to_string(),
            })?;
        fields.insert(name, value.to_string());
    }
    Ok(fields)
}

/// Postback body for the student login button
pub fn login_form(
    hidden: &BTreeMap<&'static str, String>,
    credentials: &PortalCredentials,
) -> Vec<(&'static str, String)> {
    let hidden_value = |name: &str| hidden.get(name).cloned().unwrap_or_default();
    vec![
        ("__EVENTTARGET", "abcd3".to_string()),
        ("__EVENTARGUMENT", String::new()),
        ("__LASTFOCUS", String::new()),
        ("__VIEWSTATE", hidden_value("__VIEWSTATE")),
        ("__VIEWSTATEGENERATOR", hidden_value("__VIEWSTATEGENERATOR")),
        ("__EVENTVALIDATION", hidden_value("__EVENTVALIDATION")),
        ("rdolst", "S".to_string()),
        ("txtusercheck", credentials.roll_number.clone()),
        ("txtpwdcheck", credentials.password.expose().clone()),
        ("abcd3", "Login".to_string()),
    ]
}

/// The portal answers a bad login with the form again plus a script alert
pub fn is_rejected(body: &str) -> bool {
    body.contains("Invalid") || body.to_lowercase().contains("alert")
}

/// Log in on `client`, leaving the session cookie in its cookie store
pub async fn authenticate(
    client: &Client,
    settings: &PortalSettings,
    credentials: &PortalCredentials,
) -> Result<()> {
    let candidates = login_url_candidates(settings);
    tracing::info!(candidates = ?candidates, "Login URL candidates");

    let mut login_page = None;
    for (attempt, url) in candidates.iter().enumerate() {
        tracing::info!(attempt = attempt + 1, url = %url, "Attempting login GET");
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| login_request_error("Login page request", e))?;

        let has_next = attempt + 1 < candidates.len();
        if response.status() == StatusCode::NOT_FOUND && has_next {
            tracing::warn!(url = %url, "Login URL returned 404, trying alternative URL");
            continue;
        }
        let response = response
            .error_for_status()
            .map_err(|e| login_request_error("Login page request", e))?;
        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| login_request_error("Login page request", e))?;
        login_page = Some((final_url, body));
        break;
    }

    let (login_url, body) =
        login_page.ok_or_else(|| login_error("Login page could not be retrieved."))?;
    let hidden = extract_hidden_fields(&body)?;

    let response = client
        .post(&login_url)
        .header(header::REFERER, login_url.as_str())
        .header(header::USER_AGENT, USER_AGENT)
        .form(&login_form(&hidden, credentials))
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| login_request_error("Login request", e))?;
    tracing::info!(url = %response.url(), "Login POST completed");

    let body = response
        .text()
        .await
        .map_err(|e| login_request_error("Login request", e))?;
    if is_rejected(&body) {
        return Err(FormError::Rejected.into());
    }
    Ok(())
}
