//! Transition conditions
//!
//! Guards on transitions are small boolean expressions over document fields:
//! equality and inequality comparisons combined with `all`/`any` groups.
//! They are plain data, serialized inside the workflow definition, and are
//! deliberately not a scripting language; everything a condition can do is
//! visible in the definition itself.

use crate::document::{FieldReader, FieldValue};
use crate::errors::EvaluationError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A boolean guard expression over document fields
///
/// Groups evaluate operands in declared order and short-circuit, so an
/// evaluation error in a later operand is only surfaced when the earlier
/// operands did not already decide the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Field equals a literal value
    Eq {
        /// Field to read
        field: String,
        /// Literal to compare against
        value: FieldValue,
    },
    /// Field differs from a literal value
    Ne {
        /// Field to read
        field: String,
        /// Literal to compare against
        value: FieldValue,
    },
    /// Every sub-condition holds
    All(Vec<Condition>),
    /// At least one sub-condition holds
    Any(Vec<Condition>),
}

impl Condition {
    /// Condition that a field equals a literal
    pub fn eq(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Condition::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Condition that a field differs from a literal
    pub fn ne(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Condition::Ne {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Combine with another condition, requiring both
    pub fn and(self, other: Condition) -> Self {
        match self {
            Condition::All(mut operands) => {
                operands.push(other);
                Condition::All(operands)
            }
            first => Condition::All(vec![first, other]),
        }
    }

    /// Combine with another condition, requiring either
    pub fn or(self, other: Condition) -> Self {
        match self {
            Condition::Any(mut operands) => {
                operands.push(other);
                Condition::Any(operands)
            }
            first => Condition::Any(vec![first, other]),
        }
    }

    /// Evaluate against a document's fields
    ///
    /// A referenced field absent from the document is an
    /// [`EvaluationError::MissingField`] — an authoring bug, never silently
    /// treated as false. Comparing values of different kinds is simply
    /// unequal.
    pub fn evaluate(&self, doc: &dyn FieldReader) -> Result<bool, EvaluationError> {
        match self {
            Condition::Eq { field, value } => {
                let actual = doc.field(field).ok_or_else(|| EvaluationError::MissingField {
                    field: field.clone(),
                })?;
                Ok(actual == *value)
            }
            Condition::Ne { field, value } => {
                let actual = doc.field(field).ok_or_else(|| EvaluationError::MissingField {
                    field: field.clone(),
                })?;
                Ok(actual != *value)
            }
            Condition::All(operands) => {
                if operands.is_empty() {
                    return Err(EvaluationError::EmptyGroup);
                }
                for operand in operands {
                    if !operand.evaluate(doc)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Condition::Any(operands) => {
                if operands.is_empty() {
                    return Err(EvaluationError::EmptyGroup);
                }
                for operand in operands {
                    if operand.evaluate(doc)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}
