//! Bulk import walkthrough.
//!
//! Uploads a small lead CSV, polls the batch to completion, and prints the
//! failure report if any rows were rejected.
//!
//! Run with:
//!   MARKETO_ENDPOINT=https://123-ABC-456.mktorest.com \
//!   MARKETO_CLIENT_ID=... MARKETO_CLIENT_SECRET=... \
//!   cargo run --example bulk_import

use std::time::Duration;

use marketo_api::bulk::BulkImportClient;
use marketo_api::client::MarketoClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let endpoint = std::env::var("MARKETO_ENDPOINT")?;
    let client_id = std::env::var("MARKETO_CLIENT_ID")?;
    let client_secret = std::env::var("MARKETO_CLIENT_SECRET")?;

    let bulk = BulkImportClient::new(MarketoClient::new(endpoint, client_id, client_secret)?);
    let lead = bulk.import_object("lead");

    let csv_data = "email,firstName,lastName\n\
                    ann@example.com,Ann,Archer\n\
                    ben@example.com,Ben,Baker\n";

    println!("Uploading {} data rows...", csv_data.lines().count() - 1);
    let batches = bulk.create_import(&lead, csv_data).await?;
    for batch in &batches {
        println!("batch {} queued (import {})", batch.batch_id, batch.import_id);
    }

    // Poll every five seconds, for up to five minutes.
    let schedule = std::iter::repeat(Duration::from_secs(5)).take(60);
    let batch = bulk
        .wait_for_import(&lead, batches[0].batch_id, schedule)
        .await?;

    println!(
        "batch {} finished: {} ({} processed, {} failed, {} warnings)",
        batch.batch_id,
        batch.status,
        batch.records_processed(),
        batch.failures,
        batch.warnings
    );

    if batch.failures > 0 {
        for failure in bulk.get_failures(&lead, batch.batch_id).await? {
            println!("  rejected {:?}: {}", failure.fields, failure.reason);
        }
    }

    Ok(())
}
