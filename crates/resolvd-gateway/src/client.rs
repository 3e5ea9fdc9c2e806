use std::time::Duration;

use resolvd_error::{Error, Result};
use serde_json::Value;

/// A normalized HTTP response: status code plus the parsed JSON body.
///
/// Bodies that are not valid JSON are carried as a JSON string so callers
/// still see whatever the backend said.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub code: u16,
    /// Parsed response body
    pub body: Value,
}

impl ApiResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Converts a non-success response into an [`Error::Api`].
    pub fn into_success(self) -> Result<ApiResponse> {
        if self.is_success() {
            Ok(self)
        } else {
            let message = self
                .body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Err(Error::Api { code: self.code, message })
        }
    }
}

/// Thin reqwest wrapper shared by every outbound collaborator.
///
/// Applies a fixed delay before each request so bursts of queries do not
/// hammer the public indexers, and a hard timeout per request. Failures
/// surface as [`Error::Http`]; no retries happen at this layer.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    request_delay: Duration,
}

impl HttpClient {
    /// Builds a client with the given pre-request delay and timeout.
    pub fn new(request_delay_ms: u64, timeout_ms: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self {
            client,
            request_delay: Duration::from_millis(request_delay_ms),
        })
    }

    async fn throttle(&self) {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
    }

    async fn finish(response: reqwest::Response) -> Result<ApiResponse> {
        let code = response.status().as_u16();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(ApiResponse { code, body })
    }

    /// Issues a GET request with optional headers.
    pub async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<ApiResponse> {
        self.throttle().await;
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        tracing::debug!(url, "gateway GET");
        Self::finish(request.send().await?).await
    }

    /// Issues a POST request with a JSON body and optional headers.
    pub async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> Result<ApiResponse> {
        self.throttle().await;
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        tracing::debug!(url, "gateway POST");
        Self::finish(request.send().await?).await
    }
}
