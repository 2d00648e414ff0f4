use crate::config::{Config, Mode};
use crate::errors::WealthEngineError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Client for the WealthEngine REST API.
///
/// Configuration is validated once, in the constructor, and never changes
/// afterwards. Clones share the underlying `reqwest::Client`, so a single
/// instance can serve concurrent tasks.
#[derive(Clone)]
pub struct WealthEngine {
    client: reqwest::Client,
    mode: Mode,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for WealthEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WealthEngine")
            .field("mode", &self.mode)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl WealthEngine {
    /// Creates a new `WealthEngine` client with a default transport.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Key issued at https://dev.wealthengine.com. Must not be empty.
    /// * `mode` - exactly `"Dev"` for the sandbox or `"Prod"` for production.
    pub fn new(api_key: impl Into<String>, mode: &str) -> Result<Self, WealthEngineError> {
        Self::with_client(api_key, mode, reqwest::Client::new())
    }

    /// Creates a client around a caller-configured transport.
    ///
    /// Timeouts, proxies and TLS settings belong on `client`; this crate adds
    /// none of its own.
    pub fn with_client(
        api_key: impl Into<String>,
        mode: &str,
        client: reqwest::Client,
    ) -> Result<Self, WealthEngineError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(WealthEngineError::Config(
                "WealthEngine must be initialized with a valid APIKey from https://dev.wealthengine.com"
                    .to_string(),
            ));
        }
        let mode = Mode::from_str(mode)?;

        tracing::debug!("WealthEngine client created in {} mode", mode);

        Ok(Self {
            client,
            mode,
            base_url: mode.base_url().to_string(),
            api_key,
        })
    }

    /// Builds a client from environment-loaded settings.
    pub fn from_config(config: &Config) -> Result<Self, WealthEngineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                WealthEngineError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        let we = Self::with_client(config.api_key.clone(), config.mode.as_str(), client)?;
        match config.base_url {
            Some(ref url) => we.with_base_url(url),
            None => Ok(we),
        }
    }

    /// Points the client at a different API root than the mode's default.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, WealthEngineError> {
        let parsed = Url::parse(base_url).map_err(|e| {
            WealthEngineError::Config(format!("Invalid base URL {:?}: {}", base_url, e))
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(WealthEngineError::Config(format!(
                "Base URL must use http or https, got {}",
                parsed.scheme()
            )));
        }
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the resource URL for a path relative to the API root.
    pub fn resource_url(&self, path: &str) -> Result<Url, WealthEngineError> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    /// Returns the resource URL for `prefix` followed by `id` as a single
    /// path segment. Characters such as `/` or `?` in the id are escaped.
    pub fn resource_url_with_id(&self, prefix: &str, id: &str) -> Result<Url, WealthEngineError> {
        let mut url = self.resource_url(prefix.trim_end_matches('/'))?;
        url.path_segments_mut()
            .map_err(|_| {
                WealthEngineError::Url(format!("{} cannot take path segments", self.base_url))
            })?
            .push(id);
        Ok(url)
    }

    /// Builds an authorized POST request carrying a JSON body.
    pub fn post_request(&self, url: Url, body: Vec<u8>) -> RequestBuilder {
        self.request(Method::POST, url).body(body)
    }

    /// Builds an authorized GET request.
    pub fn get_request(&self, url: Url) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("APIKey {}", self.api_key))
    }

    /// Sends a request and returns the raw body of a successful response.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, WealthEngineError> {
        let response = request.send().await.map_err(WealthEngineError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(WealthEngineError::Read)?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            tracing::error!("WealthEngine returned error {}: {}", status, body);
            return Err(WealthEngineError::Api { status, body });
        }

        tracing::debug!("WealthEngine response: {} ({} bytes)", status, body.len());
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = WealthEngine::new("key", "Dev");
        assert!(client.is_ok());
    }

    #[test]
    fn test_rejects_empty_api_key() {
        assert!(matches!(
            WealthEngine::new("", "Dev"),
            Err(WealthEngineError::Config(_))
        ));
        assert!(WealthEngine::new("   ", "Prod").is_err());
    }

    #[test]
    fn test_rejects_empty_and_unknown_mode() {
        assert!(WealthEngine::new("key", "").is_err());
        assert!(WealthEngine::new("key", "Staging").is_err());
    }

    #[test]
    fn test_mode_selects_base_url() {
        let dev = WealthEngine::new("key", "Dev").unwrap();
        let prod = WealthEngine::new("key", "Prod").unwrap();
        assert_eq!(dev.base_url(), "https://api-sandbox.wealthengine.com/v1");
        assert_eq!(prod.base_url(), "https://api.wealthengine.com/v1");
        assert_eq!(
            dev.resource_url("profile/find_one/by_email/full")
                .unwrap()
                .as_str(),
            "https://api-sandbox.wealthengine.com/v1/profile/find_one/by_email/full"
        );
    }

    #[test]
    fn test_resource_url_keeps_trailing_slash() {
        let we = WealthEngine::new("key", "Prod").unwrap();
        assert_eq!(
            we.resource_url("score/score_one/by_phone/").unwrap().as_str(),
            "https://api.wealthengine.com/v1/score/score_one/by_phone/"
        );
    }

    #[test]
    fn test_resource_url_with_id_escapes_segment() {
        let we = WealthEngine::new("key", "Prod").unwrap();
        assert_eq!(
            we.resource_url_with_id("job/status/", "abc123").unwrap().as_str(),
            "https://api.wealthengine.com/v1/job/status/abc123"
        );
        assert_eq!(
            we.resource_url_with_id("job/status", "a/b?c").unwrap().as_str(),
            "https://api.wealthengine.com/v1/job/status/a%2Fb%3Fc"
        );
    }

    #[test]
    fn test_with_base_url_validation() {
        let we = WealthEngine::new("key", "Dev")
            .unwrap()
            .with_base_url("http://127.0.0.1:8080/")
            .unwrap();
        assert_eq!(we.base_url(), "http://127.0.0.1:8080");
        assert_eq!(we.mode(), Mode::Dev);

        let bad = WealthEngine::new("key", "Dev")
            .unwrap()
            .with_base_url("ftp://example.com");
        assert!(bad.is_err());
    }

    #[test]
    fn test_requests_carry_auth_headers() {
        let we = WealthEngine::new("secret", "Dev").unwrap();
        let url = we.resource_url("job/status/abc").unwrap();
        let request = we.get_request(url).build().unwrap();
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.headers()[AUTHORIZATION], "APIKey secret");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");

        let url = we.resource_url("profile/find_many/full").unwrap();
        let request = we.post_request(url, b"{}".to_vec()).build().unwrap();
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.headers()[AUTHORIZATION], "APIKey secret");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let we = WealthEngine::new("secret-key", "Prod").unwrap();
        assert!(!format!("{:?}", we).contains("secret-key"));
    }
}
