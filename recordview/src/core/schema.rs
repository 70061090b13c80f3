use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

use super::traits::ListRecord;
use crate::errors::SchemaError;
use crate::validation::{ValidationError, ValidationErrors, validators};

/// Placeholder substituted with the record id in navigation templates.
pub const ID_PLACEHOLDER: &str = ":id";

/// Displayable column of a list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ColumnSpec {
    /// Display label
    pub name: String,
    /// Field name read from the record
    pub key: String,
    #[serde(default)]
    pub sortable: bool,
    /// Path template such as `/customers/:id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_template: Option<String>,
}

impl ColumnSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            sortable: false,
            navigation_template: None,
        }
    }

    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub fn navigate_to(mut self, template: impl Into<String>) -> Self {
        self.navigation_template = Some(template.into());
        self
    }

    /// Resolve the navigation template for one record.
    ///
    /// Returns `None` when the column has no template or the record has no `id`.
    pub fn navigation_path<R: ListRecord + ?Sized>(&self, record: &R) -> Option<String> {
        let template = self.navigation_template.as_deref()?;
        let id = record.field("id")?;
        Some(template.replace(ID_PLACEHOLDER, &id.to_text()))
    }
}

/// One entry of the filter vocabulary: a filterable field and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

/// One entry of the sort vocabulary: a sortable field and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SortOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RangeKind {
    Number,
    Date,
}

/// A field that accepts `<key>_gte` / `<key>_lte` bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RangeField {
    pub key: String,
    pub kind: RangeKind,
}

/// Static list vocabulary of one entity type.
///
/// Built in code (or by `#[derive(ListRecord)]`) or loaded from JSON
/// configuration with [`ListSchema::from_json`]. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListSchema {
    /// Plural resource name, used in `Content-Range` headers and logs
    pub resource: String,
    pub columns: Vec<ColumnSpec>,
    /// Display labels for a filter picker. The engine never reads these:
    /// filtering is driven by `status_field`, `search_fields` and
    /// `range_fields` alone.
    #[serde(default)]
    pub filter_options: Vec<FilterOption>,
    #[serde(default)]
    pub sort_options: Vec<SortOption>,
    /// Field compared against the `status` parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_field: Option<String>,
    /// Fields matched by the `q` free-text search
    #[serde(default)]
    pub search_fields: Vec<String>,
    #[serde(default)]
    pub range_fields: Vec<RangeField>,
}

impl ListSchema {
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            columns: Vec::new(),
            filter_options: Vec::new(),
            sort_options: Vec::new(),
            status_field: None,
            search_fields: Vec::new(),
            range_fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn filter_option(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter_options.push(FilterOption {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn sort_option(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.sort_options.push(SortOption {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn status_field(mut self, key: impl Into<String>) -> Self {
        self.status_field = Some(key.into());
        self
    }

    #[must_use]
    pub fn search_field(mut self, key: impl Into<String>) -> Self {
        self.search_fields.push(key.into());
        self
    }

    #[must_use]
    pub fn range_field(mut self, key: impl Into<String>, kind: RangeKind) -> Self {
        self.range_fields.push(RangeField {
            key: key.into(),
            kind,
        });
        self
    }

    /// Load a schema from JSON configuration and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Parse`] for malformed JSON and
    /// [`SchemaError::Invalid`] when [`ListSchema::validate`] rejects it.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    #[must_use]
    pub fn find_column(&self, key: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.key == key)
    }

    /// A key is sortable when it is in the sort vocabulary or names a sortable column.
    #[must_use]
    pub fn is_sortable(&self, key: &str) -> bool {
        self.sort_options.iter().any(|option| option.value == key)
            || self
                .columns
                .iter()
                .any(|column| column.sortable && column.key == key)
    }

    #[must_use]
    pub fn range_kind(&self, key: &str) -> Option<RangeKind> {
        self.range_fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.kind)
    }

    /// Check the vocabulary for mistakes that would otherwise surface as
    /// silently empty columns or ignored sorts.
    ///
    /// # Errors
    ///
    /// Returns every problem found, not just the first one.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut collect = |result: Result<(), ValidationError>| {
            if let Err(error) = result {
                errors.add(error);
            }
        };

        collect(validators::validate_required("resource", &self.resource));

        let mut seen = HashSet::new();
        for column in &self.columns {
            collect(validators::validate_required("columns.name", &column.name));
            collect(validators::validate_field_name("columns.key", &column.key));
            if !seen.insert(column.key.as_str()) {
                collect(Err(ValidationError::new(
                    "columns.key",
                    format!("Duplicate column key '{}'", column.key),
                )));
            }
            if let Some(template) = &column.navigation_template
                && !template.contains(ID_PLACEHOLDER)
            {
                collect(Err(ValidationError::new(
                    "columns.navigation_template",
                    format!("Template '{template}' has no '{ID_PLACEHOLDER}' placeholder"),
                )));
            }
        }

        for option in &self.filter_options {
            collect(validators::validate_required("filter_options.label", &option.label));
            collect(validators::validate_field_name("filter_options.value", &option.value));
        }
        for option in &self.sort_options {
            collect(validators::validate_required("sort_options.label", &option.label));
            collect(validators::validate_field_name("sort_options.value", &option.value));
        }
        if let Some(status_field) = &self.status_field {
            collect(validators::validate_field_name("status_field", status_field));
        }
        for key in &self.search_fields {
            collect(validators::validate_field_name("search_fields", key));
        }

        let mut seen_ranges = HashSet::new();
        for field in &self.range_fields {
            collect(validators::validate_field_name("range_fields.key", &field.key));
            if !seen_ranges.insert(field.key.as_str()) {
                collect(Err(ValidationError::new(
                    "range_fields.key",
                    format!("Duplicate range field '{}'", field.key),
                )));
            }
        }

        errors.result()
    }
}
