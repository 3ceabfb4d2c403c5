//! # marketo-objects
//!
//! Marketo custom objects API client.
//!
//! Custom objects are administrator-defined record types whose field schemas
//! are not known at compile time. This crate covers:
//!
//! - **Discovery** - list the objects an instance exposes, describe one
//!   object's schema (with per-field searchability)
//! - **Filtering** - query records by a searchable field, with pagination
//! - **Dynamic decoding** - promote the record identifier and sequence into
//!   typed attributes while preserving every other field in an open map

mod client;
mod metadata;
mod query;
mod record;

pub use client::{CustomObjectsClient, FilterPage};
pub use metadata::{
    CustomObjectMetadata, ObjectField, ObjectRelation, ObjectState, ObjectVersion, RelatedObject,
};
pub use query::FilterQuery;
pub use record::CustomObjectRecord;

// The error taxonomy is shared across the workspace and lives in
// marketo-client; re-exported here for convenient access.
pub use marketo_client::{Error, ErrorKind, Result};
