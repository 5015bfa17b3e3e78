use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ids::{FormId, SubmissionId};
use crate::domain::value_objects::timestamps::Timestamp;

/// Reference to an uploaded file answer. The bytes live in external storage;
/// only the reference travels through the delivery pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileRef {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// One raw answer exactly as the submitter provided it.
///
/// The untagged representation keeps the wire shape identical to the stored
/// shape: strings stay strings, multi-select answers stay string arrays, and
/// file answers stay objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Many(Vec<String>),
    File(FileRef),
}

#[derive(Debug)]
pub enum SubmissionDataError {
    Invalid(String),
}

/// The answers of one submission, keyed by field name.
///
/// Values are restricted to the three shapes the form runtime produces.
/// Anything else fails `from_value`, which the trigger surfaces as a client
/// error before any delivery work starts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionData(BTreeMap<String, FieldValue>);

impl SubmissionData {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Validate a raw JSON document into typed submission data.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, SubmissionDataError> {
        if !value.is_object() {
            return Err(SubmissionDataError::Invalid(
                "submission data must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value.clone())
            .map_err(|e| SubmissionDataError::Invalid(e.to_string()))
    }

    /// Render back to raw JSON, byte-compatible with what was validated.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(&self.0).unwrap_or(serde_json::Value::Null)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.0.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub id: SubmissionId,
    pub form_id: FormId,
    pub submitted_at: Timestamp,
    pub data: SubmissionData,
}
