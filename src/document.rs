// Copyright 2025 Cowboy AI, LLC.

//! Document value model
//!
//! The engine never owns business documents; it reads a snapshot of one. A
//! snapshot carries the record's id, its commit status, and a flat map of
//! named field values. Conditions read fields only through the narrow
//! [`FieldReader`] capability, never the full record.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A document field value readable by workflow conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean field
    Bool(bool),
    /// Numeric field
    Num(f64),
    /// Text field
    Str(String),
    /// Explicitly empty field
    Null,
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Num(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Num(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Num(n) => write!(f, "{n}"),
            FieldValue::Str(s) => write!(f, "{s}"),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

/// Commit status of a business document
///
/// Mirrored by each workflow state's `doc_status`; the applier keeps the two
/// in sync as part of the same logical operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum CommitStatus {
    /// Not yet committed
    Draft,
    /// Committed
    Submitted,
    /// Committed and subsequently cancelled
    Cancelled,
}

impl CommitStatus {
    /// Whether the document has been cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CommitStatus::Cancelled)
    }
}

impl fmt::Display for CommitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitStatus::Draft => write!(f, "Draft"),
            CommitStatus::Submitted => write!(f, "Submitted"),
            CommitStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Identifier of a business document in the external store
///
/// Documents keep their human-readable record names (e.g. `SO-00042`); the
/// engine treats the name as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a document id from a record name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the record name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Read-only key/value access to a document's fields
///
/// The condition evaluator depends on this capability alone, keeping guard
/// logic decoupled from any concrete record type.
pub trait FieldReader {
    /// Read a named field, `None` if the document does not carry it
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Engine-side snapshot of an external business document
///
/// The workflow state lives among the fields, under the name configured by
/// the definition's `state_field`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Document {
    id: DocumentId,
    commit_status: CommitStatus,
    fields: HashMap<String, FieldValue>,
}

impl Document {
    /// Create a new draft document with no fields
    pub fn new(id: impl Into<DocumentId>) -> Self {
        Self {
            id: id.into(),
            commit_status: CommitStatus::Draft,
            fields: HashMap::new(),
        }
    }

    /// Add a field value
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get the document id
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Get the commit status
    pub fn commit_status(&self) -> CommitStatus {
        self.commit_status
    }

    /// Set the commit status
    pub fn set_commit_status(&mut self, status: CommitStatus) {
        self.commit_status = status;
    }

    /// Set a field value
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Read the workflow state stored under the given field name
    ///
    /// `None` if the field is absent or not textual.
    pub fn state(&self, state_field: &str) -> Option<&str> {
        match self.fields.get(state_field) {
            Some(FieldValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl FieldReader for Document {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.fields.get(name).cloned()
    }
}
