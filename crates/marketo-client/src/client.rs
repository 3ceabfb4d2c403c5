//! Core HTTP transport with retry and rate-limit handling.

use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBody, RequestBuilder, RequestMethod};
use crate::response::Response;
use crate::retry::RetryPolicy;

/// HTTP client with transport-level retry.
///
/// Retry applies only to connection failures, request timeouts, and
/// retryable statuses (429, 5xx). Once attempts are exhausted the last
/// response is handed back unchanged so the API layer can tag the failure
/// with the operation that caused it. API-level outcomes are never retried.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Access the underlying reqwest client (for the token fetch, which
    /// bypasses bearer attachment and retry).
    pub(crate) fn raw(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    /// Execute a request with automatic transport-level retry.
    #[instrument(skip(self, request, bearer), fields(method = ?request.method, url = %request.url))]
    pub async fn execute(
        &self,
        request: &RequestBuilder,
        bearer: Option<&str>,
    ) -> Result<Response> {
        let mut retry_policy = self
            .config
            .retry
            .as_ref()
            .map(|c| RetryPolicy::new(c.clone()));

        loop {
            match self.execute_once(request, bearer).await {
                Ok(response) => {
                    if is_retryable_status(response.status()) {
                        if let Some(ref mut policy) = retry_policy {
                            if let Some(delay) = policy.next_delay(response.retry_after()) {
                                warn!(
                                    status = response.status(),
                                    attempt = policy.attempt(),
                                    delay_ms = delay.as_millis() as u64,
                                    "retryable status, retrying"
                                );
                                tokio::time::sleep(delay).await;
                                continue;
                            }
                        }
                    }
                    return Ok(response);
                }
                Err(err) if err.is_retryable() => {
                    if let Some(ref mut policy) = retry_policy {
                        if let Some(delay) = policy.next_delay(None) {
                            warn!(
                                attempt = policy.attempt(),
                                delay_ms = delay.as_millis() as u64,
                                error = %err,
                                "request failed, retrying"
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                    }
                    return Err(err);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Execute a single request without retry logic.
    async fn execute_once(
        &self,
        request: &RequestBuilder,
        bearer: Option<&str>,
    ) -> Result<Response> {
        let mut req = self.inner.request(request.method.to_reqwest(), &request.url);

        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if !request.query_params.is_empty() {
            req = req.query(&request.query_params);
        }

        if let Some(ref body) = request.body {
            req = match body {
                RequestBody::Json(value) => req.json(value),
                RequestBody::Form(pairs) => req.form(pairs),
                RequestBody::Multipart(part) => req.multipart(part.to_form()?),
            };
        }

        if self.config.enable_tracing {
            debug!(method = ?request.method, url = %request.url, "sending request");
        }

        let response = req.send().await?;

        if self.config.enable_tracing {
            let status = response.status().as_u16();
            if response.status().is_success() {
                debug!(status, "response received");
            } else {
                info!(status, "non-success response");
            }
        }

        Ok(Response::new(response))
    }
}

/// Check if an HTTP status code is worth a transport-level retry.
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn no_retry_client() -> HttpClient {
        HttpClient::new(ClientConfig::builder().without_retry().build()).unwrap()
    }

    #[tokio::test]
    async fn test_successful_request_with_bearer() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/test"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .mount(&mock_server)
            .await;

        let client = no_retry_client();
        let request = client.get(format!("{}/test", mock_server.uri()));
        let response = client.execute(&request, Some("test-token")).await.unwrap();

        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_non_success_status_is_returned_not_raised() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = no_retry_client();
        let request = client.get(format!("{}/missing", mock_server.uri()));
        let response = client.execute(&request, None).await.unwrap();

        assert!(response.is_not_found());
    }

    #[tokio::test]
    async fn test_retry_on_503_until_success() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;

        let mock_server = MockServer::start().await;
        let call_count = Arc::new(AtomicU32::new(0));
        let call_count_clone = call_count.clone();

        Mock::given(method("GET"))
            .and(path("/retry"))
            .respond_with(move |_: &wiremock::Request| {
                let count = call_count_clone.fetch_add(1, Ordering::SeqCst);
                if count < 2 {
                    ResponseTemplate::new(503)
                } else {
                    ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true}))
                }
            })
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(
            ClientConfig::builder()
                .with_retry(
                    crate::RetryConfig::default()
                        .with_max_attempts(3)
                        .with_initial_delay(std::time::Duration::from_millis(10))
                        .without_jitter(),
                )
                .build(),
        )
        .unwrap();

        let request = client.get(format!("{}/retry", mock_server.uri()));
        let response = client.execute(&request, None).await.unwrap();

        assert!(response.is_success());
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausted_retries_return_last_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(
            ClientConfig::builder()
                .with_retry(
                    crate::RetryConfig::default()
                        .with_max_attempts(1)
                        .with_initial_delay(std::time::Duration::from_millis(1))
                        .without_jitter(),
                )
                .build(),
        )
        .unwrap();

        let request = client.get(format!("{}/down", mock_server.uri()));
        let response = client.execute(&request, None).await.unwrap();

        assert_eq!(response.status(), 503);
    }

    #[tokio::test]
    async fn test_form_body_is_urlencoded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/form"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = no_retry_client();
        let request = client
            .post(format!("{}/form", mock_server.uri()))
            .form(vec![("filterType".to_string(), "id".to_string())]);
        let response = client.execute(&request, None).await.unwrap();

        assert!(response.is_success());

        let received = &mock_server.received_requests().await.unwrap()[0];
        assert_eq!(received.body, b"filterType=id");
    }
}
