//! Custom objects API client.

use std::collections::HashSet;
use tracing::instrument;

use marketo_client::{Error, ErrorKind, MarketoClient, Result};

use crate::metadata::CustomObjectMetadata;
use crate::query::FilterQuery;
use crate::record::CustomObjectRecord;

/// Operation labels carried by HTTP-status errors.
const LIST_CUSTOM_OBJECTS: &str = "list custom objects";
const DESCRIBE_CUSTOM_OBJECT: &str = "describe custom object";
const FILTER_CUSTOM_OBJECTS: &str = "filter custom objects";

/// One page of filter results.
#[derive(Debug, Clone)]
pub struct FilterPage {
    pub records: Vec<CustomObjectRecord>,
    /// Token for requesting the next page, if the server issued one.
    pub next_page_token: Option<String>,
    /// Whether the server reported more results past this page.
    pub more_result: bool,
}

/// Client for the Marketo custom objects API.
///
/// # Example
///
/// ```rust,ignore
/// use marketo_client::MarketoClient;
/// use marketo_objects::{CustomObjectsClient, FilterQuery};
///
/// let client = CustomObjectsClient::new(MarketoClient::new(
///     "https://123-ABC-456.mktorest.com",
///     "client-id",
///     "client-secret",
/// )?);
///
/// let car = client.describe("car_c").await?;
/// println!("{} fields", car.fields.len());
///
/// let page = client
///     .filter("car_c", &FilterQuery::new("vin", ["WBA123"]))
///     .await?;
/// for record in page.records {
///     println!("{}: {:?}", record.marketo_guid, record.fields);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CustomObjectsClient {
    client: MarketoClient,
}

impl CustomObjectsClient {
    /// Create a custom objects client over an existing [`MarketoClient`].
    pub fn new(client: MarketoClient) -> Self {
        Self { client }
    }

    /// Get the underlying MarketoClient.
    pub fn inner(&self) -> &MarketoClient {
        &self.client
    }

    /// List the custom objects available on the instance.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CustomObjectMetadata>> {
        let url = self.client.url(&["rest", "v1", "customobjects.json"]);
        let request = self.client.get(url);

        let mut envelope = self
            .client
            .send_envelope(&request, LIST_CUSTOM_OBJECTS)
            .await?;
        envelope.results()
    }

    /// Describe one custom object.
    ///
    /// Flattens the object's searchable field sets into each field's
    /// `searchable` flag. An unknown API name yields a not-found error.
    #[instrument(skip(self))]
    pub async fn describe(&self, api_name: &str) -> Result<CustomObjectMetadata> {
        let url = self
            .client
            .url(&["rest", "v1", "customobjects", api_name, "describe.json"]);
        let request = self.client.get(url);

        let mut envelope = self
            .client
            .send_envelope(&request, DESCRIBE_CUSTOM_OBJECT)
            .await?;
        let mut objects: Vec<CustomObjectMetadata> = envelope.results()?;
        if objects.is_empty() {
            return Err(Error::new(ErrorKind::NotFound(format!(
                "custom object {}",
                api_name
            ))));
        }

        let mut object = objects.swap_remove(0);
        let searchable: HashSet<String> = object
            .searchable_fields
            .iter()
            .flatten()
            .cloned()
            .collect();
        for field in &mut object.fields {
            field.searchable = searchable.contains(&field.name);
        }

        Ok(object)
    }

    /// Filter a custom object's records.
    ///
    /// Each result row is decoded through the dynamic record decoder; the
    /// pagination token comes back alongside the records so the caller can
    /// request the next page with
    /// [`FilterQuery::with_page_token`](crate::FilterQuery::with_page_token).
    #[instrument(skip(self, query))]
    pub async fn filter(&self, api_name: &str, query: &FilterQuery) -> Result<FilterPage> {
        let url = self.client.url(&[
            "rest",
            "v1",
            "customobjects",
            &format!("{}.json", api_name),
        ]);
        let request = self
            .client
            .post(url)
            .query("_method", "GET")
            .form(query.to_form());

        let mut envelope = self
            .client
            .send_envelope(&request, FILTER_CUSTOM_OBJECTS)
            .await?;
        let raw: Vec<serde_json::Value> = envelope.results()?;
        let records = raw
            .into_iter()
            .map(CustomObjectRecord::from_value)
            .collect::<Result<Vec<_>>>()?;

        Ok(FilterPage {
            records,
            next_page_token: envelope.next_page_token,
            more_result: envelope.more_result,
        })
    }
}
