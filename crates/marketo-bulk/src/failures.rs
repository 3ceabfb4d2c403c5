//! Failure report decoding.
//!
//! A completed batch with rejected rows exposes a CSV document: the header
//! names the input columns plus a trailing reason column, and each data row
//! carries one rejected record with the reason it was rejected. The reason
//! column's header cell is a label, not a data field, and is discarded.

use std::collections::HashMap;

use marketo_client::{Error, ErrorKind, Result};

/// One rejected input record from an import's failure report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFailure {
    /// Why the record was rejected.
    pub reason: String,
    /// The record's fields, keyed by the CSV header names.
    pub fields: HashMap<String, String>,
}

/// Decode a failure report body.
///
/// Lenient by documented policy: a malformed data row (wrong column count,
/// bad quoting, a mid-stream read error) stops the scan and the failures
/// decoded so far are returned. A missing or malformed header fails the
/// whole call with a decode error.
pub(crate) fn decode_failure_report(data: &[u8]) -> Result<Vec<ImportFailure>> {
    let mut reader = csv::Reader::from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| {
            Error::with_source(ErrorKind::Decode(format!("failure report header: {}", e)), e)
        })?
        .clone();
    if headers.is_empty() {
        return Err(Error::new(ErrorKind::Decode(
            "failure report has no header row".to_string(),
        )));
    }

    // the last header cell labels the reason column
    let reason_index = headers.len() - 1;

    let mut failures = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else {
            break;
        };

        let mut fields = HashMap::with_capacity(reason_index);
        for i in 0..reason_index {
            fields.insert(
                headers[i].to_string(),
                record.get(i).unwrap_or_default().to_string(),
            );
        }

        failures.push(ImportFailure {
            reason: record.get(reason_index).unwrap_or_default().to_string(),
            fields,
        });
    }

    Ok(failures)
}
