//! Page fetching

use crate::errors::{fetch_error, Result};
use portalwatch_core::config::PortalSettings;
use portalwatch_core::model::Domain;
use reqwest::Client;

/// GET the page holding `domain`'s table
///
/// A body without the expected table id usually means the session expired.
/// That is only logged here: the body is still returned so the parser can
/// report exactly what is missing.
pub async fn fetch_page(client: &Client, settings: &PortalSettings, domain: Domain) -> Result<String> {
    let url = settings.page_url(domain);
    tracing::info!(domain = %domain, url = %url, "Fetching page");

    let response = client
        .get(&url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| fetch_error(domain, e))?;
    let body = response.text().await.map_err(|e| fetch_error(domain, e))?;

    let table_id = settings.table_id(domain);
    if !table_marker_present(&body, table_id) {
        tracing::warn!(
            domain = %domain,
            table_id = %table_id,
            "Table not found in response. Login may have expired."
        );
    }
    Ok(body)
}

/// Cheap substring check for the table id; an empty id always passes
pub fn table_marker_present(body: &str, table_id: &str) -> bool {
    table_id.is_empty() || body.contains(table_id)
}
