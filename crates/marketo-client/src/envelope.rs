//! The common Marketo response envelope.
//!
//! Every JSON endpoint wraps its payload in the same shape: a `result`
//! array, optional application-level `errors`, and pagination fields for
//! filter/list calls. A 200 response with a non-empty `errors` array is a
//! failed call and must never be treated as an empty success.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};

/// A single application-level error entry from a response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// The common response wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
    #[serde(default)]
    pub warnings: Vec<ApiError>,
    #[serde(default)]
    pub more_result: bool,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl Envelope {
    /// Returns true if the envelope carries application-level errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Fail with an API error carrying all reported reasons if the envelope
    /// has error entries, otherwise pass the envelope through.
    pub fn checked(self, status: u16) -> Result<Self> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(Error::new(ErrorKind::Api {
                status,
                reasons: self.errors,
            }))
        }
    }

    /// Decode and take the `result` payload as rows. An absent payload
    /// decodes as an empty list.
    pub fn results<T: DeserializeOwned>(&mut self) -> Result<Vec<T>> {
        match self.result.take() {
            None => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }
}
