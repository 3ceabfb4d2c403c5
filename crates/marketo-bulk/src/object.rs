//! Import endpoint resolution.
//!
//! Every object kind is addressed through three path templates: one to
//! create an import, one to check a batch's status, and one to fetch its
//! failure report. The built-in lead object has fixed paths; any other API
//! name is treated as a custom object and its paths are synthesized.

use std::collections::HashMap;

/// Placeholder in status/failures templates, replaced by the batch ID.
const BATCH_ID: &str = "{batch_id}";

/// The three bulk-endpoint path templates for one object kind.
///
/// Immutable once built. The status and failures templates embed exactly one
/// `{batch_id}` placeholder; the create template has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportObject {
    create: String,
    status: String,
    failures: String,
}

impl ImportObject {
    /// Build an import object from explicit path templates.
    pub fn new(
        create: impl Into<String>,
        status: impl Into<String>,
        failures: impl Into<String>,
    ) -> Self {
        Self {
            create: create.into(),
            status: status.into(),
            failures: failures.into(),
        }
    }

    /// Endpoints for the built-in lead object.
    pub fn leads() -> Self {
        Self::new(
            "leads",
            format!("leads/batch/{}", BATCH_ID),
            format!("leads/batch/{}/failures", BATCH_ID),
        )
    }

    /// Endpoints for an administrator-defined custom object.
    pub fn custom(api_name: &str) -> Self {
        Self::new(
            format!("customobjects/{}/import", api_name),
            format!("customobjects/{}/import/{}/status", api_name, BATCH_ID),
            format!("customobjects/{}/import/{}/failures", api_name, BATCH_ID),
        )
    }

    /// Path for creating a new import.
    pub fn create_path(&self) -> &str {
        &self.create
    }

    /// Path for checking the given batch's status.
    pub fn status_path(&self, batch_id: i64) -> String {
        self.status.replace(BATCH_ID, &batch_id.to_string())
    }

    /// Path for the given batch's failure report.
    pub fn failures_path(&self, batch_id: i64) -> String {
        self.failures.replace(BATCH_ID, &batch_id.to_string())
    }
}

/// Registry mapping well-known API names to their import endpoints.
///
/// Pure lookup, no I/O; resolution cannot fail. Unknown names synthesize
/// custom-object templates. The default registry knows the built-in `lead`
/// object; tests and future built-ins can extend it with [`with_object`].
///
/// [`with_object`]: ImportObjects::with_object
#[derive(Debug, Clone)]
pub struct ImportObjects {
    known: HashMap<String, ImportObject>,
}

impl Default for ImportObjects {
    fn default() -> Self {
        let mut known = HashMap::new();
        known.insert("lead".to_string(), ImportObject::leads());
        Self { known }
    }
}

impl ImportObjects {
    /// Create the default registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a well-known object kind.
    pub fn with_object(mut self, api_name: impl Into<String>, object: ImportObject) -> Self {
        self.known.insert(api_name.into(), object);
        self
    }

    /// Resolve an API name to its import endpoints.
    pub fn resolve(&self, api_name: &str) -> ImportObject {
        self.known
            .get(api_name)
            .cloned()
            .unwrap_or_else(|| ImportObject::custom(api_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder_count(template: &str) -> usize {
        template.matches(BATCH_ID).count()
    }

    #[test]
    fn test_lead_resolves_to_builtin_paths() {
        let objects = ImportObjects::new();
        let lead = objects.resolve("lead");

        assert_eq!(lead.create_path(), "leads");
        assert_eq!(lead.status_path(42), "leads/batch/42");
        assert_eq!(lead.failures_path(42), "leads/batch/42/failures");
    }

    #[test]
    fn test_unknown_name_synthesizes_custom_object_paths() {
        let objects = ImportObjects::new();
        let car = objects.resolve("car_c");

        assert_eq!(car.create_path(), "customobjects/car_c/import");
        assert_eq!(car.status_path(7), "customobjects/car_c/import/7/status");
        assert_eq!(car.failures_path(7), "customobjects/car_c/import/7/failures");
    }

    #[test]
    fn test_templates_embed_exactly_one_placeholder() {
        for object in [ImportObject::leads(), ImportObject::custom("car_c")] {
            assert_eq!(placeholder_count(object.create_path()), 0);
            assert_eq!(placeholder_count(&object.status), 1);
            assert_eq!(placeholder_count(&object.failures), 1);
        }
    }

    #[test]
    fn test_registry_extension() {
        let objects = ImportObjects::new().with_object(
            "program_member",
            ImportObject::new(
                "program/members",
                "program/members/batch/{batch_id}",
                "program/members/batch/{batch_id}/failures",
            ),
        );

        let member = objects.resolve("program_member");
        assert_eq!(member.status_path(3), "program/members/batch/3");

        // built-ins survive extension
        assert_eq!(objects.resolve("lead").create_path(), "leads");
    }
}
