//! Filter query construction.

/// Parameters for a custom-object filter call.
///
/// The filter type names a searchable field (or the object's dedupe/id
/// field); the values are matched against it. List parameters render
/// comma-joined, the way the API expects them.
///
/// # Example
///
/// ```rust,ignore
/// use marketo_objects::FilterQuery;
///
/// let query = FilterQuery::new("vin", ["WBA123", "WBA456"])
///     .with_fields(["make", "model"])
///     .with_batch_size(50);
/// ```
#[derive(Debug, Clone)]
pub struct FilterQuery {
    filter_type: String,
    filter_values: Vec<String>,
    fields: Vec<String>,
    batch_size: Option<u32>,
    next_page_token: Option<String>,
}

impl FilterQuery {
    /// Create a query matching the given values against a filter field.
    pub fn new(
        filter_type: impl Into<String>,
        filter_values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            filter_type: filter_type.into(),
            filter_values: filter_values.into_iter().map(Into::into).collect(),
            fields: Vec::new(),
            batch_size: None,
            next_page_token: None,
        }
    }

    /// Restrict which fields are returned for each record.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the page size.
    pub fn with_batch_size(mut self, size: u32) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Continue from a previous page's token.
    pub fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(token.into());
        self
    }

    /// Render as url-encoded form pairs.
    pub(crate) fn to_form(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("filterType".to_string(), self.filter_type.clone()),
            ("filterValues".to_string(), self.filter_values.join(",")),
        ];
        if !self.fields.is_empty() {
            pairs.push(("fields".to_string(), self.fields.join(",")));
        }
        if let Some(size) = self.batch_size {
            pairs.push(("batchSize".to_string(), size.to_string()));
        }
        if let Some(ref token) = self.next_page_token {
            pairs.push(("nextPageToken".to_string(), token.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_query() {
        let query = FilterQuery::new("idField", ["g1"]);
        assert_eq!(
            query.to_form(),
            vec![
                ("filterType".to_string(), "idField".to_string()),
                ("filterValues".to_string(), "g1".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_parameters_are_comma_joined() {
        let query = FilterQuery::new("vin", ["WBA123", "WBA456"]).with_fields(["make", "model"]);
        let form = query.to_form();

        assert!(form.contains(&("filterValues".to_string(), "WBA123,WBA456".to_string())));
        assert!(form.contains(&("fields".to_string(), "make,model".to_string())));
    }

    #[test]
    fn test_pagination_parameters() {
        let query = FilterQuery::new("idField", ["g1"])
            .with_batch_size(50)
            .with_page_token("WQV2VQVPPCKHC6AQYVK7JDSA3J3LCWXH");
        let form = query.to_form();

        assert!(form.contains(&("batchSize".to_string(), "50".to_string())));
        assert!(form.contains(&(
            "nextPageToken".to_string(),
            "WQV2VQVPPCKHC6AQYVK7JDSA3J3LCWXH".to_string()
        )));
    }
}
