//! reqwest-backed transport.

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Method;
use url::Url;

use crate::config::ClientConfig;
use crate::sync::error::{SyncError, SyncResult};
use crate::sync::transport::{SyncMethod, SyncRequest, SyncResponse, Transport, TransportFuture};

/// Header carrying the CSRF token.
const CSRF_HEADER: &str = "x-csrftoken";

/// Transport sending JSON requests over HTTP.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport from the given configuration.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> SyncResult<Self> {
        let client = Self::build_client(config)?;
        let base_url = normalize_base(&config.base_url)?;
        Ok(Self { client, base_url })
    }

    /// The base URL request paths are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a request path against the base URL.
    ///
    /// Any path prefix of the base URL is kept.
    ///
    /// # Errors
    /// Returns an error if the joined URL is invalid.
    pub fn resolve(&self, path: &str) -> SyncResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn build_client(config: &ClientConfig) -> SyncResult<reqwest::Client> {
        let mut headers = HeaderMap::new();

        if let Ok(ua) = HeaderValue::from_str(&config.user_agent) {
            headers.insert(USER_AGENT, ua);
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.csrf_token {
            let value = HeaderValue::from_str(token)
                .map_err(|e| SyncError::HttpClient(format!("invalid CSRF token: {e}")))?;
            headers.insert(HeaderName::from_static(CSRF_HEADER), value);
        }

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| SyncError::HttpClient(e.to_string()))
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: SyncRequest) -> TransportFuture<'_, SyncResult<SyncResponse>> {
        Box::pin(async move {
            let url = self.resolve(&request.path)?;
            let method = match request.method {
                SyncMethod::Post => Method::POST,
                SyncMethod::Put => Method::PUT,
            };

            tracing::debug!("{} {url}", request.method);
            let response = self
                .client
                .request(method, url)
                .json(&request.body)
                .send()
                .await?;

            let status = response.status().as_u16();
            let bytes = response.bytes().await?;
            let body = if bytes.is_empty() {
                None
            } else {
                // Non-JSON bodies (HTML error pages) are dropped, the status still reports.
                serde_json::from_slice(&bytes).ok()
            };

            Ok(SyncResponse { status, body })
        })
    }
}

/// Parse the base URL and make sure it ends with a slash so joins append.
fn normalize_base(raw: &str) -> SyncResult<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keeps_base_prefix() {
        let config = ClientConfig::new().with_base_url("https://go.example.org/app");
        let transport = HttpTransport::new(&config).unwrap();

        let url = transport
            .resolve("/conversation/conversation1/edit_groups/")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://go.example.org/app/conversation/conversation1/edit_groups/"
        );
    }

    #[test]
    fn test_resolve_at_root() {
        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        let url = transport.resolve("/conversation/c1/edit_groups/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/conversation/c1/edit_groups/");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig::new().with_base_url("not a url");
        assert!(matches!(
            HttpTransport::new(&config),
            Err(SyncError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_invalid_csrf_token() {
        let config = ClientConfig::new().with_csrf_token("bad\ntoken");
        assert!(matches!(
            HttpTransport::new(&config),
            Err(SyncError::HttpClient(_))
        ));
    }
}
