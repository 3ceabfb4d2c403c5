//! # marketo-client
//!
//! Core HTTP client infrastructure for the Marketo REST API.
//!
//! This crate provides the foundation the API-specific crates build on:
//! - OAuth 2.0 client-credentials token acquisition with caching
//! - The common response envelope and its error semantics
//! - Transport-level retry with exponential backoff and jitter
//! - The unified error taxonomy for all Marketo operations
//! - Request building and endpoint URL joining
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │              (marketo-bulk, marketo-objects)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     MarketoClient                           │
//! │  - Holds credentials + token cache + endpoint               │
//! │  - url(): joins the endpoint with path segments             │
//! │  - execute(): authenticated dispatch                        │
//! │  - send_envelope(): status + envelope error checks          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HttpClient                             │
//! │  - Raw HTTP with transport-level retry                      │
//! │  - Request building, response handling                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security
//!
//! The client secret and access tokens are redacted in Debug output, token
//! fetches are skipped in tracing spans, and error messages are sanitized
//! so credentials embedded in request URLs never reach logs.

mod auth;
mod client;
mod config;
mod envelope;
mod error;
mod request;
mod response;
mod retry;

mod marketo;

pub use auth::{Credentials, TokenResponse};
pub use client::HttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use envelope::{ApiError, Envelope};
pub use error::{Error, ErrorKind, Result};
pub use marketo::MarketoClient;
pub use request::{FilePart, RequestBody, RequestBuilder, RequestMethod};
pub use response::Response;
pub use retry::{RetryConfig, RetryPolicy};

/// User-Agent string for the client.
pub const USER_AGENT: &str = concat!("marketo-api/", env!("CARGO_PKG_VERSION"));
