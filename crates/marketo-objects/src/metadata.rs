//! Custom-object metadata types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Approval state of a custom object's definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectState {
    Draft,
    Approved,
    ApprovedWithDraft,
}

/// Which version of the definition a description refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectVersion {
    Draft,
    Approved,
}

/// The far side of an object relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedObject {
    pub field: String,
    pub name: String,
}

/// A link between a custom object and another object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRelation {
    pub field: String,
    pub related_to: RelatedObject,
    #[serde(rename = "type")]
    pub relation_type: String,
}

/// One field of a custom object's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectField {
    pub data_type: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub length: i64,
    pub name: String,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub crm_managed: bool,
    /// Derived during describe from the object's searchable field sets;
    /// not present on the wire.
    #[serde(default)]
    pub searchable: bool,
}

/// Metadata describing one custom object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomObjectMetadata {
    #[serde(default)]
    pub id_field: String,
    /// The API name used to address the object in import and filter calls.
    #[serde(rename = "name")]
    pub api_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub plural_name: String,
    #[serde(default)]
    pub fields: Vec<ObjectField>,
    /// Sets of fields that can be combined in a filter; flattened into each
    /// field's `searchable` flag by describe.
    #[serde(default)]
    pub searchable_fields: Vec<Vec<String>>,
    #[serde(default)]
    pub dedupe_fields: Vec<String>,
    #[serde(default)]
    pub relationships: Vec<ObjectRelation>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub state: Option<ObjectState>,
    #[serde(default)]
    pub version: Option<ObjectVersion>,
}
