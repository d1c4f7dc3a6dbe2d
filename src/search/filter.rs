//! Metadata filtering for search candidates.
//!
//! A filter maps dotted metadata paths (e.g. `metadata.category`) to
//! either an exact-equality constraint or an in-set constraint.
//! Filtering is a best-effort predicate, not a schema validator: a
//! candidate whose metadata lacks a referenced path simply does not
//! match.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single filter constraint.
///
/// Deserializes from either a literal JSON value (equality) or the
/// `{"$in": [...]}` operator form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Candidate value must be a member of the set
    In {
        #[serde(rename = "$in")]
        values: Vec<Value>,
    },
    /// Candidate value must equal the literal
    Equals(Value),
}

/// A conjunction of path constraints; every entry must hold for a
/// candidate to match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataFilter {
    constraints: BTreeMap<String, FilterValue>,
}

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact-equality constraint for a dotted path.
    pub fn equals(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints
            .insert(path.into(), FilterValue::Equals(value.into()));
        self
    }

    /// Add an in-set constraint for a dotted path.
    pub fn within(mut self, path: impl Into<String>, values: Vec<Value>) -> Self {
        self.constraints
            .insert(path.into(), FilterValue::In { values });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Evaluate the filter against a candidate's metadata object.
    pub fn matches(&self, metadata: &Value) -> bool {
        self.constraints.iter().all(|(path, constraint)| {
            match resolve_path(metadata, path) {
                Some(found) => match constraint {
                    FilterValue::Equals(expected) => found == expected,
                    FilterValue::In { values } => values.contains(found),
                },
                // Missing path means "does not match", never an error
                None => false,
            }
        })
    }
}

/// Walk a dotted path into a metadata object. A leading `metadata`
/// segment is skipped so filters written as `metadata.category` work
/// against the bare metadata object they are evaluated on.
fn resolve_path<'a>(metadata: &'a Value, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.').peekable();
    if segments.peek() == Some(&"metadata") {
        segments.next();
    }

    let mut current = metadata;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
