//! Schema-agnostic record decoding.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use marketo_client::{Error, ErrorKind, Result};

/// A single record returned when filtering custom objects.
///
/// Custom-object schemas are administrator-defined, so the field set is not
/// known at compile time. Only the record identifier and its sequence number
/// are promoted into typed attributes; every other returned key, including
/// ones this client has never seen, is preserved in `fields` without loss
/// or renaming.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomObjectRecord {
    /// The record's unique identifier (`marketoGUID` on the wire).
    pub marketo_guid: String,
    /// Position of the record within the result set (`seq` on the wire).
    pub seq: i64,
    /// Every remaining attribute of the record, keyed by wire name.
    pub fields: Map<String, Value>,
}

impl CustomObjectRecord {
    /// Decode a wire record in two passes: take the payload as a generic
    /// JSON map, lift the promoted keys out, keep the remainder.
    ///
    /// Missing promoted keys decode to their zero values; a promoted key of
    /// the wrong type fails with a decode error naming the record.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut fields = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::new(ErrorKind::Decode(format!(
                    "custom object record must be a JSON object, got {}",
                    json_type(&other)
                ))))
            }
        };

        let marketo_guid = match fields.remove("marketoGUID") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(guid)) => guid,
            Some(other) => {
                return Err(Error::new(ErrorKind::Decode(format!(
                    "record field `marketoGUID` must be a string, got {}",
                    json_type(&other)
                ))))
            }
        };

        let seq = match fields.remove("seq") {
            None | Some(Value::Null) => 0,
            Some(value) => value.as_i64().ok_or_else(|| {
                Error::new(ErrorKind::Decode(format!(
                    "record {:?}: field `seq` must be an integer",
                    marketo_guid
                )))
            })?,
        };

        Ok(Self {
            marketo_guid,
            seq,
            fields,
        })
    }
}

impl<'de> Deserialize<'de> for CustomObjectRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
