//! Autotask query filter encoding.
//!
//! Search endpoints (`<Entity>/query`) take a JSON document with a
//! `MaxRecords` cap and a `filter` array. Each condition names a field, an
//! operator and a value; several conditions are wrapped in one `and` group.

use serde::Serialize;
use serde_json::Value;

/// Largest page Autotask returns from a query.
pub const MAX_RECORDS_LIMIT: u32 = 500;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_RECORDS: u32 = 20;

/// A single filter condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCondition {
    /// The entity field to filter on (e.g. `companyID`).
    pub field: String,

    /// Comparison operator: `eq`, `contains`, `exist`, ...
    pub op: String,

    /// The value to compare against. Omitted for `exist`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FilterCondition {
    /// Exact match.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: "eq".to_string(),
            value: Some(value.into()),
        }
    }

    /// Substring match.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: "contains".to_string(),
            value: Some(Value::String(value.into())),
        }
    }

    /// Matches every record that has the field set.
    pub fn exist(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: "exist".to_string(),
            value: None,
        }
    }
}

/// Builder for the `search` document of a query endpoint.
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    conditions: Vec<FilterCondition>,
    max_records: Option<u32>,
}

impl QueryFilter {
    /// Creates an empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition.
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, condition: FilterCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Adds a condition only when `value` is present.
    pub fn add_opt<T>(self, value: Option<T>, make: impl FnOnce(T) -> FilterCondition) -> Self {
        match value {
            Some(v) => self.add(make(v)),
            None => self,
        }
    }

    /// Caps the number of returned records.
    pub fn with_max_records(mut self, max: u32) -> Self {
        self.max_records = Some(max);
        self
    }

    /// Number of conditions added so far.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns true if no conditions were added.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Builds the JSON search document.
    ///
    /// One condition is sent as-is; several are grouped under a single
    /// `and`; none becomes `exist` on `id`, because Autotask refuses a query
    /// without a filter.
    pub fn to_search(&self) -> Value {
        let filter = match self.conditions.len() {
            0 => serde_json::json!([FilterCondition::exist("id")]),
            1 => serde_json::json!(self.conditions),
            _ => serde_json::json!([{ "op": "and", "items": self.conditions }]),
        };

        serde_json::json!({
            "MaxRecords": self.max_records.unwrap_or(DEFAULT_RECORDS),
            "filter": filter,
        })
    }
}
