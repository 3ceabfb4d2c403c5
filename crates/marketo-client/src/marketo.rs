//! High-level Marketo client: endpoint addressing, auth, and the envelope
//! send path shared by every JSON API call.

use tracing::instrument;

use crate::auth::{Credentials, TokenSource};
use crate::client::HttpClient;
use crate::config::ClientConfig;
use crate::envelope::Envelope;
use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestBuilder;
use crate::response::Response;
use std::sync::Arc;

/// High-level Marketo API client.
///
/// Combines credentials with HTTP infrastructure and provides the two
/// contracts the API-specific crates build on: `execute` (authenticated
/// request dispatch) and `url` (endpoint joining). Cloning is cheap and
/// clones share the token cache.
///
/// # Example
///
/// ```rust,ignore
/// use marketo_client::MarketoClient;
///
/// let client = MarketoClient::new(
///     "https://123-ABC-456.mktorest.com",
///     "client-id",
///     "client-secret",
/// )?;
///
/// let request = client.get(client.url(&["rest", "v1", "customobjects.json"]));
/// let envelope = client.send_envelope(&request, "list custom objects").await?;
/// ```
#[derive(Clone)]
pub struct MarketoClient {
    http: HttpClient,
    endpoint: String,
    tokens: Arc<TokenSource>,
}

impl std::fmt::Debug for MarketoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketoClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl MarketoClient {
    /// Create a new client for the given instance endpoint
    /// (e.g. `https://123-ABC-456.mktorest.com`).
    pub fn new(
        endpoint: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(endpoint, client_id, client_secret, ClientConfig::default())
    }

    /// Create a new client with custom HTTP configuration.
    pub fn with_config(
        endpoint: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        url::Url::parse(&endpoint)?;

        let http = HttpClient::new(config)?;
        let tokens = Arc::new(TokenSource::new(Credentials::new(
            client_id,
            client_secret,
        )));

        Ok(Self {
            http,
            endpoint,
            tokens,
        })
    }

    /// Get the instance endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Join the instance endpoint with path segments.
    ///
    /// `url(&["bulk", "v1", "leads.json"])` ->
    /// `https://.../bulk/v1/leads.json`.
    pub fn url(&self, segments: &[&str]) -> String {
        let mut url = self.endpoint.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        self.http.get(url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        self.http.post(url)
    }

    /// Execute a request with a valid access token attached.
    pub async fn execute(&self, request: &RequestBuilder) -> Result<Response> {
        let identity = format!("{}/identity", self.endpoint);
        let token = self.tokens.token(self.http.raw(), &identity).await?;
        self.http.execute(request, Some(&token)).await
    }

    /// Execute a request expecting an enveloped JSON response.
    ///
    /// Fails with the HTTP-status error (tagged with `operation`) on any
    /// non-200 status before the body is looked at, and with an API error
    /// when a 200 envelope carries application-level error entries.
    #[instrument(skip(self, request), fields(operation = operation))]
    pub async fn send_envelope(
        &self,
        request: &RequestBuilder,
        operation: &'static str,
    ) -> Result<Envelope> {
        let response = self.execute(request).await?;

        let status = response.status();
        if status != 200 {
            return Err(Error::new(ErrorKind::Http { operation, status }));
        }

        let envelope: Envelope = response.json().await?;
        envelope.checked(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_token(mock_server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/identity/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "t-0",
                "token_type": "bearer",
                "expires_in": 3599
            })))
            .mount(mock_server)
            .await;
    }

    fn test_client(endpoint: &str) -> MarketoClient {
        MarketoClient::with_config(
            endpoint,
            "id",
            "secret",
            ClientConfig::builder().without_retry().build(),
        )
        .unwrap()
    }

    #[test]
    fn test_url_joining() {
        let client = test_client("https://123-ABC-456.mktorest.com");
        assert_eq!(
            client.url(&["bulk", "v1", "leads.json"]),
            "https://123-ABC-456.mktorest.com/bulk/v1/leads.json"
        );
        assert_eq!(
            client.url(&["rest", "v1", "customobjects", "car_c.json"]),
            "https://123-ABC-456.mktorest.com/rest/v1/customobjects/car_c.json"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = test_client("https://123-ABC-456.mktorest.com/");
        assert_eq!(client.endpoint(), "https://123-ABC-456.mktorest.com");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let err = MarketoClient::new("not a url", "id", "secret").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
    }

    #[test]
    fn test_debug_omits_credentials() {
        let client = test_client("https://123-ABC-456.mktorest.com");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret"));
    }

    #[tokio::test]
    async fn test_send_envelope_attaches_token() {
        let mock_server = MockServer::start().await;
        mount_token(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/customobjects.json"))
            .and(header("Authorization", "Bearer t-0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "requestId": "abc",
                "success": true,
                "result": []
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let request = client.get(client.url(&["rest", "v1", "customobjects.json"]));
        let envelope = client
            .send_envelope(&request, "list custom objects")
            .await
            .unwrap();

        assert!(envelope.success);
    }

    #[tokio::test]
    async fn test_send_envelope_tags_http_errors_with_operation() {
        let mock_server = MockServer::start().await;
        mount_token(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/customobjects.json"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let request = client.get(client.url(&["rest", "v1", "customobjects.json"]));
        let err = client
            .send_envelope(&request, "list custom objects")
            .await
            .unwrap_err();

        match err.kind {
            ErrorKind::Http { operation, status } => {
                assert_eq!(operation, "list custom objects");
                assert_eq!(status, 403);
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_envelope_surfaces_api_errors_on_200() {
        let mock_server = MockServer::start().await;
        mount_token(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/customobjects.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "requestId": "abc",
                "success": false,
                "errors": [{"code": "1013", "message": "Object not found"}]
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let request = client.get(client.url(&["rest", "v1", "customobjects.json"]));
        let err = client
            .send_envelope(&request, "list custom objects")
            .await
            .unwrap_err();

        assert!(err.is_api_error());
    }
}
