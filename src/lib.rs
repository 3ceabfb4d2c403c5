//! # marketo-api
//!
//! A Marketo REST API client library for Rust.
//!
//! This facade re-exports the workspace crates:
//!
//! - **marketo-client** - HTTP infrastructure: OAuth client-credentials
//!   tokens, transport retry, the response envelope, the error taxonomy
//! - **marketo-bulk** - bulk import lifecycle: multipart CSV upload, status
//!   polling, failure reports
//! - **marketo-objects** - custom objects: discovery, filtering, dynamic
//!   record decoding
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use marketo_api::bulk::BulkImportClient;
//! use marketo_api::client::MarketoClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), marketo_api::client::Error> {
//!     let client = MarketoClient::new(
//!         "https://123-ABC-456.mktorest.com",
//!         std::env::var("MARKETO_CLIENT_ID").unwrap(),
//!         std::env::var("MARKETO_CLIENT_SECRET").unwrap(),
//!     )?;
//!
//!     let bulk = BulkImportClient::new(client);
//!     let lead = bulk.import_object("lead");
//!
//!     let batches = bulk
//!         .create_import(&lead, "email,firstName\na@x.com,Ann\n")
//!         .await?;
//!
//!     let schedule = std::iter::repeat(Duration::from_secs(5)).take(60);
//!     let batch = bulk
//!         .wait_for_import(&lead, batches[0].batch_id, schedule)
//!         .await?;
//!
//!     println!(
//!         "{}: {} processed, {} failed",
//!         batch.status,
//!         batch.records_processed(),
//!         batch.failures
//!     );
//!     Ok(())
//! }
//! ```

#[cfg(feature = "client")]
pub use marketo_client as client;

#[cfg(feature = "bulk")]
pub use marketo_bulk as bulk;

#[cfg(feature = "objects")]
pub use marketo_objects as objects;
