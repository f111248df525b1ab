// ABOUTME: Proxy-fetch collaborator: turns a target URL plus routing options into a classified envelope.
// ABOUTME: All network failures map onto the fetch-side ErrorCode variants; callers decide what to absorb.

//! Network fetching through a scraping proxy.
//!
//! Key behaviors:
//! - Every fetch is a POST to the proxy endpoint carrying the routing zone,
//!   the target URL, and the desired response format.
//! - Transport failures become `Fetch`, deadline overruns become `Timeout`,
//!   and non-2xx proxy responses become `Upstream` with a body snippet.
//! - A successful body is classified immediately; callers receive a
//!   [`ResponseEnvelope`], never a bare string.

use serde::Serialize;
use std::fmt;
use url::Url;

use crate::envelope::ResponseEnvelope;
use crate::error::{ExtractError, FetchError};
use crate::options::Options;

/// Response format requested from the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// The page body as-is (HTML or whatever the origin served).
    Raw,
    /// Proxy-side structured parsing of the result page.
    Json,
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseFormat::Raw => write!(f, "raw"),
            ResponseFormat::Json => write!(f, "json"),
        }
    }
}

/// Per-source routing options.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Proxy routing zone, e.g. a SERP zone or an unlocker zone.
    pub zone: String,
    pub format: ResponseFormat,
}

/// One entry in a prioritized fetch plan: where to fetch and how to label it.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    /// Source tag stamped onto every record extracted from this source.
    pub tag: String,
    pub target_url: String,
    pub options: SourceOptions,
}

#[derive(Serialize)]
struct ProxyRequest<'a> {
    zone: &'a str,
    url: &'a str,
    format: String,
}

/// HTTP client that routes all fetches through the configured scraping proxy.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    opts: Options,
}

impl ProxyClient {
    /// Create a client from options, building an HTTP client unless one was
    /// supplied.
    pub fn new(opts: Options) -> Self {
        let http = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(opts.user_agent.clone())
                .timeout(opts.timeout)
                .build()
                .unwrap_or_default(),
        };
        Self { http, opts }
    }

    /// The options this client was built with.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Fetch one target URL through the proxy and classify the body.
    pub async fn fetch(
        &self,
        target_url: &str,
        source: &SourceOptions,
    ) -> Result<ResponseEnvelope, FetchError> {
        if target_url.trim().is_empty() {
            return Err(ExtractError::invalid_input("target_url", "Fetch", None));
        }
        Url::parse(target_url).map_err(|e| {
            ExtractError::invalid_input(target_url, "Fetch", Some(anyhow::Error::new(e)))
        })?;

        let payload = ProxyRequest {
            zone: &source.zone,
            url: target_url,
            format: source.format.to_string(),
        };

        let response = self
            .http
            .post(&self.opts.proxy_endpoint)
            .bearer_auth(&self.opts.api_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractError::timeout(target_url, "Fetch", Some(anyhow::Error::new(e)))
                } else {
                    ExtractError::fetch(target_url, "Fetch", Some(anyhow::Error::new(e)))
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ExtractError::fetch(target_url, "Fetch", Some(anyhow::Error::new(e)))
        })?;

        if !status.is_success() {
            return Err(ExtractError::upstream(
                target_url,
                "Fetch",
                status.as_u16(),
                &body,
            ));
        }

        tracing::debug!(url = target_url, zone = %source.zone, bytes = body.len(), "fetched source");
        Ok(ResponseEnvelope::from_body(&body))
    }
}

/// Build a travel-search URL for a hotel name within a location.
pub fn travel_search_url(hotel_name: &str, location: &str) -> Result<String, ExtractError> {
    let query = format!("{} {}", hotel_name.trim(), location.trim());
    let url = Url::parse_with_params("https://www.google.com/travel/search", &[("q", query)])
        .map_err(|e| {
            ExtractError::invalid_input("travel search", "BuildUrl", Some(anyhow::Error::new(e)))
        })?;
    Ok(url.to_string())
}
