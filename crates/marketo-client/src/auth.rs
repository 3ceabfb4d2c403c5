//! OAuth 2.0 client-credentials authentication.
//!
//! Marketo issues short-lived access tokens from the instance's identity
//! service. The token is cached until shortly before expiry and refreshed on
//! demand; callers never handle tokens directly.

use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::error::{sanitize_error_message, Error, ErrorKind, Result};

/// Refresh the token this long before the server-reported expiry.
const EXPIRY_SKEW: Duration = Duration::from_secs(60);

/// API credentials for a Marketo custom service.
///
/// The client secret is redacted in Debug output to prevent accidental
/// exposure in logs.
#[derive(Clone)]
pub struct Credentials {
    /// Client ID of the custom service.
    pub client_id: String,
    client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Create new credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

/// Token response from the identity service.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    /// Remaining lifetime in seconds.
    pub expires_in: u64,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Fetches and caches access tokens for a set of credentials.
///
/// Shared behind the client; concurrent API calls reuse the cached token and
/// only one refresh is in flight at a time.
#[derive(Debug)]
pub(crate) struct TokenSource {
    credentials: Credentials,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSource {
    pub(crate) fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            cached: Mutex::new(None),
        }
    }

    /// Return a valid access token, fetching a new one if the cached token
    /// is missing or about to expire.
    #[instrument(skip_all)]
    pub(crate) async fn token(
        &self,
        http: &reqwest::Client,
        identity_url: &str,
    ) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let response = self.fetch(http, identity_url).await?;
        debug!(expires_in = response.expires_in, "access token refreshed");

        let lifetime = Duration::from_secs(response.expires_in).saturating_sub(EXPIRY_SKEW);
        let token = CachedToken {
            access_token: response.access_token,
            expires_at: Instant::now() + lifetime,
        };
        let access_token = token.access_token.clone();
        *cached = Some(token);

        Ok(access_token)
    }

    async fn fetch(&self, http: &reqwest::Client, identity_url: &str) -> Result<TokenResponse> {
        let query = serde_urlencoded::to_string([
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret()),
        ])?;

        let response = http
            .get(format!("{}/oauth/token?{}", identity_url, query))
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(Error::new(ErrorKind::Auth(format!(
                "token endpoint returned HTTP {}",
                status
            ))));
        }

        response.json::<TokenResponse>().await.map_err(|err| {
            Error::with_source(
                ErrorKind::Auth(sanitize_error_message(&format!(
                    "malformed token response: {}",
                    err
                ))),
                err,
            )
        })
    }
}
