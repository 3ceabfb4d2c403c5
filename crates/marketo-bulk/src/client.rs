//! Bulk import client.

use bytes::Bytes;
use std::time::Duration;
use tokio::time::sleep;
use tracing::instrument;

use marketo_client::{Error, ErrorKind, FilePart, MarketoClient, Result};

use crate::failures::{decode_failure_report, ImportFailure};
use crate::object::{ImportObject, ImportObjects};
use crate::types::Batch;

/// Operation labels carried by HTTP-status errors.
const CREATE_IMPORT: &str = "create bulk import";
const GET_IMPORT: &str = "get import status";
const GET_IMPORT_FAILURES: &str = "get import failures";

/// Fixed filename for the uploaded part. The server keys on the field name
/// and the `format` query flag, not the filename.
const IMPORT_FILE_NAME: &str = "import.csv";

/// Client for the Marketo bulk import API.
///
/// An import is asynchronous: [`create_import`] uploads a CSV file and
/// returns one or more batches; callers poll [`get_import`] until a batch
/// reaches a terminal status, then optionally fetch [`get_failures`]. The
/// client holds no job state and never sleeps on its own; polling cadence
/// belongs to the caller, or to the schedule handed to [`wait_for_import`].
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use marketo_bulk::BulkImportClient;
/// use marketo_client::MarketoClient;
///
/// let client = BulkImportClient::new(MarketoClient::new(
///     "https://123-ABC-456.mktorest.com",
///     "client-id",
///     "client-secret",
/// )?);
///
/// let lead = client.import_object("lead");
/// let batches = client
///     .create_import(&lead, "email,firstName\na@x.com,Ann\n")
///     .await?;
///
/// let batch = client
///     .wait_for_import(&lead, batches[0].batch_id, std::iter::repeat(Duration::from_secs(5)).take(60))
///     .await?;
///
/// if batch.failures > 0 {
///     let failures = client.get_failures(&lead, batch.batch_id).await?;
///     for failure in failures {
///         println!("{}: {:?}", failure.reason, failure.fields);
///     }
/// }
/// ```
///
/// [`create_import`]: BulkImportClient::create_import
/// [`get_import`]: BulkImportClient::get_import
/// [`get_failures`]: BulkImportClient::get_failures
/// [`wait_for_import`]: BulkImportClient::wait_for_import
#[derive(Debug, Clone)]
pub struct BulkImportClient {
    client: MarketoClient,
    objects: ImportObjects,
}

impl BulkImportClient {
    /// Create a bulk import client over an existing [`MarketoClient`].
    pub fn new(client: MarketoClient) -> Self {
        Self {
            client,
            objects: ImportObjects::default(),
        }
    }

    /// Use a custom import-object registry.
    pub fn with_objects(mut self, objects: ImportObjects) -> Self {
        self.objects = objects;
        self
    }

    /// Get the underlying MarketoClient.
    pub fn inner(&self) -> &MarketoClient {
        &self.client
    }

    /// Resolve an object kind's API name to its import endpoints.
    pub fn import_object(&self, api_name: &str) -> ImportObject {
        self.objects.resolve(api_name)
    }

    /// Upload a new CSV file for importing.
    ///
    /// Returns the new asynchronous batches (an import may fan out into
    /// several). The payload is sent verbatim as the single `file` part of a
    /// multipart body, fully buffered in memory.
    #[instrument(skip(self, data))]
    pub async fn create_import(
        &self,
        object: &ImportObject,
        data: impl Into<Bytes>,
    ) -> Result<Vec<Batch>> {
        let url = self
            .client
            .url(&["bulk", "v1", &format!("{}.json", object.create_path())]);
        let request = self
            .client
            .post(url)
            .query("format", "csv")
            .file_part(FilePart::new(
                "file",
                IMPORT_FILE_NAME,
                "text/csv",
                data.into(),
            ));

        let mut envelope = self.client.send_envelope(&request, CREATE_IMPORT).await?;
        envelope.results()
    }

    /// Retrieve an existing import batch by its batch ID.
    ///
    /// An unknown batch ID yields a not-found error, distinct from decode
    /// and transport failures, since it indicates a caller mistake.
    #[instrument(skip(self))]
    pub async fn get_import(&self, object: &ImportObject, batch_id: i64) -> Result<Batch> {
        let url = self
            .client
            .url(&["bulk", "v1", &format!("{}.json", object.status_path(batch_id))]);
        let request = self.client.get(url);

        let mut envelope = self.client.send_envelope(&request, GET_IMPORT).await?;
        let mut batches: Vec<Batch> = envelope.results()?;
        if batches.is_empty() {
            return Err(Error::new(ErrorKind::NotFound(format!(
                "batch {}",
                batch_id
            ))));
        }

        Ok(batches.swap_remove(0))
    }

    /// Retrieve the failure report for a batch.
    ///
    /// HTTP 404 means no failures were recorded and yields an empty list,
    /// not an error. The CSV scan is lenient by documented policy: a
    /// malformed data row stops decoding and the failures accumulated so far
    /// are returned (see [`ImportFailure`]).
    #[instrument(skip(self))]
    pub async fn get_failures(
        &self,
        object: &ImportObject,
        batch_id: i64,
    ) -> Result<Vec<ImportFailure>> {
        let url = self.client.url(&[
            "bulk",
            "v1",
            &format!("{}.json", object.failures_path(batch_id)),
        ]);
        let request = self.client.get(url);

        let response = self.client.execute(&request).await?;
        if response.is_not_found() {
            // no failures recorded
            return Ok(Vec::new());
        }

        let status = response.status();
        if status != 200 {
            return Err(Error::new(ErrorKind::Http {
                operation: GET_IMPORT_FAILURES,
                status,
            }));
        }

        let body = response.bytes().await?;
        decode_failure_report(&body)
    }

    /// Poll until the batch reaches a terminal status.
    ///
    /// A thin convenience over [`get_import`]: one status call, then one
    /// delay taken from the caller's schedule, until the batch is terminal.
    /// The schedule owns all timing policy; when it runs out before the
    /// batch finishes, the wait fails with a canceled error. Dropping the
    /// future aborts the in-flight request.
    ///
    /// [`get_import`]: BulkImportClient::get_import
    #[instrument(skip(self, schedule))]
    pub async fn wait_for_import(
        &self,
        object: &ImportObject,
        batch_id: i64,
        schedule: impl IntoIterator<Item = Duration>,
    ) -> Result<Batch> {
        let mut schedule = schedule.into_iter();

        loop {
            let batch = self.get_import(object, batch_id).await?;
            if batch.status.is_terminal() {
                return Ok(batch);
            }

            match schedule.next() {
                Some(delay) => sleep(delay).await,
                None => {
                    return Err(Error::new(ErrorKind::Canceled(format!(
                        "polling schedule exhausted before batch {} reached a terminal status",
                        batch_id
                    ))))
                }
            }
        }
    }
}
