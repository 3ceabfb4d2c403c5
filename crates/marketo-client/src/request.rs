//! HTTP request building.

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::Result;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
        }
    }
}

/// Builder for HTTP requests.
///
/// Bearer authentication is attached by the client at execution time, once a
/// valid access token is available.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) query_params: Vec<(String, String)>,
    pub(crate) body: Option<RequestBody>,
}

/// Request body content.
#[derive(Debug)]
pub enum RequestBody {
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` pairs.
    Form(Vec<(String, String)>),
    /// Single-file `multipart/form-data` body.
    Multipart(FilePart),
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query_params: Vec::new(),
            body: None,
        }
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Set a JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        self.body = Some(RequestBody::Json(value));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    /// Set a url-encoded form body.
    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(pairs));
        self.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        self
    }

    /// Set a single-file multipart body. The multipart boundary content-type
    /// is supplied by the HTTP layer when the form is rendered.
    pub fn file_part(mut self, part: FilePart) -> Self {
        self.body = Some(RequestBody::Multipart(part));
        self
    }
}

/// One file part of a `multipart/form-data` body.
///
/// The part carries its bytes verbatim; the payload is fully buffered in
/// memory before sending. No size limit is enforced locally, the server is
/// the source of truth on limits.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field_name: String,
    pub file_name: String,
    pub mime_type: String,
    pub content: Bytes,
}

impl FilePart {
    /// Create a new file part.
    pub fn new(
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    /// Render the part as a fresh multipart form.
    ///
    /// Built per attempt so the transport can re-issue the request.
    pub(crate) fn to_form(&self) -> Result<reqwest::multipart::Form> {
        let part = reqwest::multipart::Part::bytes(self.content.to_vec())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime_type)?;
        Ok(reqwest::multipart::Form::new().part(self.field_name.clone(), part))
    }
}
