//! # marketo-bulk
//!
//! Marketo bulk import API client.
//!
//! ## Features
//!
//! - **Create imports** - upload a CSV file as a single multipart part; an
//!   import may fan out into several batches
//! - **Status polling** - re-fetch a batch until it reaches `Complete` or
//!   `Failed`; unrecognized statuses are passed through, never rejected
//! - **Failure reports** - decode the per-record CSV failure export, with
//!   404 treated as "no failures recorded"
//! - **Caller-owned timing** - no internal polling or backoff; the
//!   `wait_for_import` helper runs on a schedule the caller supplies
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use marketo_bulk::BulkImportClient;
//! use marketo_client::MarketoClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), marketo_bulk::Error> {
//!     let client = BulkImportClient::new(MarketoClient::new(
//!         "https://123-ABC-456.mktorest.com",
//!         "client-id",
//!         "client-secret",
//!     )?);
//!
//!     let lead = client.import_object("lead");
//!     let batches = client
//!         .create_import(&lead, "email,firstName\na@x.com,Ann\n")
//!         .await?;
//!
//!     let schedule = std::iter::repeat(Duration::from_secs(5)).take(60);
//!     let batch = client
//!         .wait_for_import(&lead, batches[0].batch_id, schedule)
//!         .await?;
//!
//!     println!("{} records processed", batch.records_processed());
//!     Ok(())
//! }
//! ```

mod client;
mod failures;
mod object;
mod types;

pub use client::BulkImportClient;
pub use failures::ImportFailure;
pub use object::{ImportObject, ImportObjects};
pub use types::{Batch, BatchStatus};

// The error taxonomy is shared across the workspace and lives in
// marketo-client; re-exported here for convenient access.
pub use marketo_client::{Error, ErrorKind, Result};
