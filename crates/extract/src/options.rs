// ABOUTME: Configuration options for the extraction core and its proxy-fetch collaborator.
// ABOUTME: ClientBuilder provides a fluent API for constructing ProxyClient instances.

use std::time::Duration;

use crate::client::ProxyClient;

/// Immutable per-process configuration.
///
/// Shared by reference across requests; nothing here is mutated after build,
/// which is what keeps concurrent per-request extraction state-free.
#[derive(Debug, Clone)]
pub struct Options {
    /// Per-source fetch timeout; a source that exceeds it contributes zero candidates.
    pub timeout: Duration,
    pub user_agent: String,
    /// The scraping proxy's request endpoint.
    pub proxy_endpoint: String,
    pub api_token: String,
    /// Routing zone for SERP-style (structured JSON) fetches.
    pub serp_zone: String,
    /// Routing zone for raw page (HTML) fetches.
    pub unlocker_zone: String,
    /// Cap on candidates taken from a single strategy pass.
    pub max_records: usize,
    pub http_client: Option<reqwest::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "staysift/0.1".to_string(),
            proxy_endpoint: "https://api.brightdata.com/request".to_string(),
            api_token: String::new(),
            serp_zone: "serp_api".to_string(),
            unlocker_zone: "web_unlocker".to_string(),
            max_records: 20,
            http_client: None,
        }
    }
}

/// Builder for constructing ProxyClient instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-source fetch timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Point at a different proxy endpoint (e.g. a local test server).
    pub fn proxy_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.opts.proxy_endpoint = endpoint.into();
        self
    }

    /// Set the proxy API token.
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.opts.api_token = token.into();
        self
    }

    /// Set the SERP routing zone.
    pub fn serp_zone(mut self, zone: impl Into<String>) -> Self {
        self.opts.serp_zone = zone.into();
        self
    }

    /// Set the unlocker routing zone.
    pub fn unlocker_zone(mut self, zone: impl Into<String>) -> Self {
        self.opts.unlocker_zone = zone.into();
        self
    }

    /// Cap the candidates taken from a single strategy pass.
    pub fn max_records(mut self, max: usize) -> Self {
        self.opts.max_records = max;
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the ProxyClient with the configured options.
    pub fn build(self) -> ProxyClient {
        ProxyClient::new(self.opts)
    }
}
