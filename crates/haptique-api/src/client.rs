// Hub HTTP client
//
// Wraps `reqwest::Client` with hub-specific URL construction and uniform
// error mapping. Endpoint groups (status, RF, IR) are implemented as
// inherent methods in separate files to keep this module focused on
// transport mechanics.

use reqwest::{Method, RequestBuilder};
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for a single Haptique IR/RF hub.
///
/// Cheap to share behind an `Arc`; the inner `reqwest::Client` owns the
/// connection pool used by both polling and commands.
#[derive(Debug, Clone)]
pub struct HubClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HubClient {
    /// Create a client for `host` (an address with optional port, e.g.
    /// `192.168.1.100` or `hub.local:8080`).
    ///
    /// The bearer token, when present and non-empty, is attached to every
    /// request as a default header.
    pub fn new(
        host: &str,
        token: Option<&SecretString>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = Self::base_url_for(host)?;
        let http = transport.build_client(token)?;
        Ok(Self { http, base_url })
    }

    /// Build `http://{host}/` from a bare host, rejecting anything that is
    /// not a plain authority.
    fn base_url_for(host: &str) -> Result<Url, Error> {
        let trimmed = host.trim().trim_end_matches('/');
        let invalid = |reason: String| Error::InvalidHost {
            host: host.to_owned(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(invalid("host is empty".into()));
        }
        if trimmed.contains("://") || trimmed.contains('/') {
            return Err(invalid("expected a host name or address, not a URL".into()));
        }

        let url = Url::parse(&format!("http://{trimmed}/")).map_err(|e| invalid(e.to_string()))?;
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host".into()));
        }
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join an endpoint path (e.g. `"api/status"`) onto the base URL.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(|e| Error::InvalidHost {
            host: self.base_url.to_string(),
            reason: e.to_string(),
        })
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("GET {url}");
        let builder = self.http.get(url.clone());
        self.send(builder, &url).await
    }

    /// Send a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("POST {url}");
        let builder = self.http.post(url.clone()).json(body);
        self.send(builder, &url).await
    }

    /// Send a POST request without a body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("POST {url}");
        let builder = self.http.request(Method::POST, url.clone());
        self.send(builder, &url).await
    }

    /// Send a DELETE request with a JSON body.
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("DELETE {url}");
        let builder = self.http.delete(url.clone()).json(body);
        self.send(builder, &url).await
    }

    /// Execute a request and decode the response.
    ///
    /// Transport failures, timeouts, non-2xx statuses and undecodable
    /// bodies all map to [`Error::Communication`]. An empty 2xx body is
    /// decoded as JSON `null`, which write acks accept.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, url: &Url) -> Result<T, Error> {
        let resp = builder
            .send()
            .await
            .map_err(|e| Error::transport(url, &e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            return Err(Error::Communication {
                url: url.to_string(),
                status: Some(status.as_u16()),
                reason: if preview.is_empty() {
                    format!("HTTP {status}")
                } else {
                    format!("HTTP {status}: {preview}")
                },
                timed_out: false,
            });
        }

        let bytes = resp.bytes().await.map_err(|e| Error::transport(url, &e))?;
        trace!(len = bytes.len(), "response body received");

        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };

        serde_json::from_slice(body).map_err(|e| {
            let preview: String = String::from_utf8_lossy(&bytes).chars().take(200).collect();
            Error::Communication {
                url: url.to_string(),
                status: Some(status.as_u16()),
                reason: format!("malformed response: {e} (body preview: {preview:?})"),
                timed_out: false,
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::HubClient;

    #[test]
    fn base_url_accepts_host_and_port() {
        let url = HubClient::base_url_for("192.168.1.100:8080").expect("valid host");
        assert_eq!(url.as_str(), "http://192.168.1.100:8080/");
    }

    #[test]
    fn base_url_rejects_schemes_and_paths() {
        assert!(HubClient::base_url_for("http://hub.local").is_err());
        assert!(HubClient::base_url_for("hub.local/api").is_err());
        assert!(HubClient::base_url_for("  ").is_err());
    }
}
