//! GiroMilano HTTP client.
//!
//! Async methods for querying the ATM GiroMilano transit-portal proxy and
//! the ATM homepage (for metro status). Handles the browser-shaped headers
//! the proxy expects and maps transport failures onto typed errors.

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use super::error::GiromilanoError;

/// Default base URL of the transit-portal proxy.
const DEFAULT_BASE_URL: &str = "https://giromilano.atm.it/proxy.tpportal/api/tpportal/tpl";

/// ATM homepage, which carries the metro status table.
const DEFAULT_STATUS_URL: &str = "https://www.atm.it/it/Pagine/default.aspx";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// The proxy rejects requests that do not look like a browser.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// How much upstream error body to keep in error messages.
const ERROR_BODY_LIMIT: usize = 500;

/// Configuration for the GiroMilano client.
#[derive(Debug, Clone)]
pub struct GiromilanoConfig {
    /// Base URL of the transit-portal proxy
    pub base_url: String,
    /// URL of the metro status page
    pub status_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GiromilanoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            status_url: DEFAULT_STATUS_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GiromilanoConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom status page URL (for testing).
    pub fn with_status_url(mut self, url: impl Into<String>) -> Self {
        self.status_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// GiroMilano API client.
#[derive(Debug, Clone)]
pub struct GiromilanoClient {
    http: reqwest::Client,
    base_url: String,
    status_url: String,
}

impl GiromilanoClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GiromilanoConfig) -> Result<Self, GiromilanoError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/html;q=0.9"));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("it-IT,it;q=0.9,en-US;q=0.8,en;q=0.7"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            status_url: config.status_url,
        })
    }

    /// Fetch the full journey-pattern listing.
    ///
    /// Returns the raw entries of the upstream `JourneyPatterns` array; each
    /// is handed to the line builder individually so one bad entry cannot
    /// sink the listing.
    pub async fn journey_patterns(&self) -> Result<Vec<Value>, GiromilanoError> {
        let url = format!("{}/journeyPatterns/", self.base_url);
        let payload = self.get_json(&url, &[]).await?;

        let patterns = payload
            .get("JourneyPatterns")
            .and_then(Value::as_array)
            .ok_or(GiromilanoError::UnexpectedPayload(
                "JourneyPatterns field is missing or not a list",
            ))?;

        Ok(patterns.clone())
    }

    /// Fetch one journey pattern by line id (e.g. "19|0").
    ///
    /// `alternative_routes` maps to the upstream `alternativeRoutesMode`
    /// flag, which also returns route variants of the line.
    pub async fn journey_pattern(
        &self,
        line_id: &str,
        alternative_routes: bool,
    ) -> Result<Value, GiromilanoError> {
        let url = format!("{}/journeyPatterns/{}", self.base_url, line_id);
        let mode = if alternative_routes { "true" } else { "false" };
        self.get_json(&url, &[("alternativeRoutesMode", mode)])
            .await
    }

    /// Fetch the line summary of a stop by stop id.
    pub async fn stop_summary(&self, stop_id: &str) -> Result<Value, GiromilanoError> {
        let url = format!("{}/stops/{}/linesummary", self.base_url, stop_id);
        self.get_json(&url, &[]).await
    }

    /// Fetch the homepage HTML carrying the metro status table.
    pub async fn status_page(&self) -> Result<String, GiromilanoError> {
        let response = self.http.get(&self.status_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GiromilanoError::UpstreamStatus {
                status: status.as_u16(),
                body: truncate(&body),
            });
        }

        Ok(response.text().await?)
    }

    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, GiromilanoError> {
        tracing::debug!(url, "fetching upstream");

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GiromilanoError::UpstreamStatus {
                status: status.as_u16(),
                body: truncate(&body),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| GiromilanoError::Json {
            message: e.to_string(),
            body: Some(truncate(&body)),
        })
    }
}

/// Truncate an upstream body for inclusion in error details.
fn truncate(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}
