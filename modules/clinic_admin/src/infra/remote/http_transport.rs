//! HTTP transport for the remote clinic service.
//!
//! Wraps `reqwest::Client` and runs every call inside an `outgoing_http` span
//! that records method, URL and response status.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{field, Instrument, Level};
use url::Url;

use crate::domain::ports::{Method, RemoteError, Transport};

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    /// Build a transport for `base_url` with a default client.
    pub fn from_base_url(base_url: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid base URL '{}': {}", base_url, e))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("Base URL '{}' cannot carry a path", base_url);
        }
        Ok(Self::new(reqwest::Client::new(), base))
    }

    /// Append `segments` to the base address, escaping each one.
    pub fn url_for(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::Network("invalid base URL".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<Value, RemoteError> {
        let mut req = self.client.request(Self::method(method), url);
        if let Some(body) = body {
            req = req.json(&body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status();
        tracing::Span::current().record("http.status_code", status.as_u16());
        if !status.is_success() {
            tracing::Span::current().record("error", true);
            return Err(RemoteError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| RemoteError::parse(e.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Value>,
    ) -> Result<Value, RemoteError> {
        let url = self.url_for(segments)?;
        let span = tracing::span!(
            Level::INFO, "outgoing_http",
            http.method = %method,
            http.url = %url,
            http.status_code = field::Empty,
            error = field::Empty,
            otel.kind = "client",
        );
        self.execute(method, url, body).instrument(span).await
    }
}
