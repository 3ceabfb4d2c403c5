//! Types for the bulk import API.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle status of an import batch.
///
/// The server drives the transitions (`Queued → Importing → {Complete |
/// Failed}`); the client only classifies the string it receives. The
/// taxonomy is open-ended on the wire, so an unrecognized status is
/// preserved verbatim in [`Other`](BatchStatus::Other) rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchStatus {
    Queued,
    Importing,
    Complete,
    Failed,
    /// A status string this client does not recognize, passed through
    /// unmodified.
    Other(String),
}

impl BatchStatus {
    fn from_wire(value: String) -> Self {
        match value.as_str() {
            "Queued" => BatchStatus::Queued,
            "Importing" => BatchStatus::Importing,
            "Complete" => BatchStatus::Complete,
            "Failed" => BatchStatus::Failed,
            _ => BatchStatus::Other(value),
        }
    }

    /// The wire representation of this status.
    pub fn as_str(&self) -> &str {
        match self {
            BatchStatus::Queued => "Queued",
            BatchStatus::Importing => "Importing",
            BatchStatus::Complete => "Complete",
            BatchStatus::Failed => "Failed",
            BatchStatus::Other(value) => value,
        }
    }

    /// Check if the batch will make no further progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchStatus::Complete | BatchStatus::Failed)
    }

    /// Check if the batch completed successfully.
    pub fn is_complete(&self) -> bool {
        matches!(self, BatchStatus::Complete)
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BatchStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(BatchStatus::from_wire)
    }
}

impl Serialize for BatchStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One asynchronous import batch, as returned by create and status calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    /// Batch ID used for status and failure lookups.
    pub batch_id: i64,
    #[serde(default)]
    pub import_id: String,
    pub status: BatchStatus,
    /// Lead count for lead imports; zero otherwise.
    #[serde(default, rename = "numOfLeadsProcessed")]
    pub leads_processed: i64,
    #[serde(default, rename = "numOfRowsFailed")]
    pub failures: i64,
    #[serde(default, rename = "numOfRowsWithWarning")]
    pub warnings: i64,
    #[serde(default)]
    pub message: String,
    /// Record count for custom-object imports; zero otherwise.
    #[serde(default, rename = "numOfObjectsProcessed")]
    pub objects_processed: i64,
    #[serde(default)]
    pub object_api_name: String,
}

impl Batch {
    /// Amount of records processed so far, normalized across object kinds.
    ///
    /// The lead counter and the generic object counter are mutually
    /// exclusive in practice; the lead counter wins when both are present.
    pub fn records_processed(&self) -> i64 {
        if self.leads_processed > 0 {
            self.leads_processed
        } else {
            self.objects_processed
        }
    }
}
