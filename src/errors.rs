// Copyright 2025 Cowboy AI, LLC.

//! Error types for workflow operations
//!
//! Each stage of the engine rejects work with its own error type so callers
//! can match on where an action was refused: building a definition
//! (`DefinitionError`), evaluating a guard (`EvaluationError`), resolving a
//! transition (`ResolutionError`), authorizing it (`AuthError`), or applying
//! it to a document (`ApplyError`).

use crate::definition::Role;
use crate::document::DocumentId;
use thiserror::Error;

/// Errors raised while building a workflow definition
///
/// These are authoring bugs in the declarative state/transition tables and
/// are fatal at load time; a definition that fails to build is never used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    /// The definition declares no states
    #[error("workflow definition declares no states")]
    NoStates,

    /// Two states share the same name
    #[error("duplicate state name: {0}")]
    DuplicateState(String),

    /// A transition starts from a state that was never declared
    #[error("transition \"{action}\" starts from undeclared state: {state}")]
    UnknownFromState {
        /// The undeclared source state
        state: String,
        /// Action on the offending transition
        action: String,
    },

    /// A transition targets a state that was never declared
    #[error("transition \"{action}\" targets undeclared state: {state}")]
    UnknownToState {
        /// The undeclared target state
        state: String,
        /// Action on the offending transition
        action: String,
    },
}

/// Errors raised while evaluating a transition condition
///
/// Conditions read document fields; a reference to a field the document does
/// not carry is an authoring bug and is surfaced, never coerced to a boolean.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// The condition references a field absent on the document
    #[error("condition references missing field: {field}")]
    MissingField {
        /// Name of the missing field
        field: String,
    },

    /// An `all`/`any` group with no operands
    #[error("condition group has no operands")]
    EmptyGroup,
}

/// Errors raised while resolving the applicable transition
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    /// The document's current state is not declared in the definition
    #[error("unknown workflow state: {state}")]
    UnknownState {
        /// The undeclared state
        state: String,
    },

    /// No transition from the current state matches the action and document
    #[error("no applicable transition from {state} for action \"{action}\"")]
    NoApplicableTransition {
        /// Current document state
        state: String,
        /// Requested action
        action: String,
    },

    /// More than one transition matched; the definition is ambiguous
    #[error("ambiguous action \"{action}\" from {state}: {matched} transitions matched")]
    AmbiguousTransition {
        /// Current document state
        state: String,
        /// Requested action
        action: String,
        /// How many transitions matched
        matched: usize,
    },

    /// A transition condition could not be evaluated
    #[error("condition evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// Errors raised by the authorization gate
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The actor does not hold the role the transition requires
    #[error("action requires role {required}")]
    RoleMismatch {
        /// Role the transition is gated on
        required: Role,
    },

    /// The actor submitted the document and the transition forbids
    /// self-approval; a different holder of the role must act
    #[error("self-approval denied for action \"{action}\"")]
    SelfApprovalDenied {
        /// The refused action
        action: String,
    },
}

/// Errors raised while applying a resolved transition to a document
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApplyError {
    /// The document store has no record for the id
    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// The document does not carry the definition's state field
    #[error("document is missing its workflow state field: {field}")]
    MissingStateField {
        /// Name of the configured state field
        field: String,
    },

    /// The state field changed between resolution and commit
    #[error("concurrent modification: resolved against state {expected}, found {found}")]
    ConcurrentModification {
        /// State the transition was resolved against
        expected: String,
        /// State found on re-read
        found: String,
    },

    /// Resolution rejected the action
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Authorization rejected the actor
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The document store collaborator failed
    #[error("document store error: {0}")]
    Store(String),

    /// The authorization provider collaborator failed
    #[error("authorization provider error: {0}")]
    Provider(String),
}

impl ApplyError {
    /// Check if this rejection is safe to retry after re-reading the document
    pub fn is_concurrency_error(&self) -> bool {
        matches!(self, ApplyError::ConcurrentModification { .. })
    }

    /// Check if this is a permission failure
    pub fn is_permission_error(&self) -> bool {
        matches!(self, ApplyError::Auth(_))
    }

    /// Check if this is a resolution failure (illegal or ambiguous action)
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, ApplyError::Resolution(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = DefinitionError::DuplicateState("Draft".to_string());
        assert_eq!(err.to_string(), "duplicate state name: Draft");

        let err = DefinitionError::UnknownToState {
            state: "Done".to_string(),
            action: "Complete".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "transition \"Complete\" targets undeclared state: Done"
        );

        let err = EvaluationError::MissingField {
            field: "order_type".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "condition references missing field: order_type"
        );

        let err = ResolutionError::NoApplicableTransition {
            state: "Draft".to_string(),
            action: "Complete".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no applicable transition from Draft for action \"Complete\""
        );

        let err = ResolutionError::AmbiguousTransition {
            state: "Draft".to_string(),
            action: "Process".to_string(),
            matched: 2,
        };
        assert_eq!(
            err.to_string(),
            "ambiguous action \"Process\" from Draft: 2 transitions matched"
        );

        let err = AuthError::RoleMismatch {
            required: Role::new("Sales User"),
        };
        assert_eq!(err.to_string(), "action requires role Sales User");

        let err = ApplyError::ConcurrentModification {
            expected: "Draft".to_string(),
            found: "Cancelled".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "concurrent modification: resolved against state Draft, found Cancelled"
        );
    }

    #[test]
    fn test_transparent_wrapping() {
        let resolution: ApplyError = ResolutionError::UnknownState {
            state: "Limbo".to_string(),
        }
        .into();
        assert_eq!(resolution.to_string(), "unknown workflow state: Limbo");
        assert!(resolution.is_resolution_error());

        let auth: ApplyError = AuthError::SelfApprovalDenied {
            action: "Cancel".to_string(),
        }
        .into();
        assert_eq!(
            auth.to_string(),
            "self-approval denied for action \"Cancel\""
        );
        assert!(auth.is_permission_error());

        let evaluation: ResolutionError = EvaluationError::EmptyGroup.into();
        assert_eq!(
            evaluation.to_string(),
            "condition evaluation failed: condition group has no operands"
        );
    }

    #[test]
    fn test_helper_method_exclusivity() {
        let concurrency = ApplyError::ConcurrentModification {
            expected: "A".to_string(),
            found: "B".to_string(),
        };
        assert!(concurrency.is_concurrency_error());
        assert!(!concurrency.is_permission_error());
        assert!(!concurrency.is_resolution_error());

        let store = ApplyError::Store("connection reset".to_string());
        assert!(!store.is_concurrency_error());
        assert!(!store.is_permission_error());
        assert!(!store.is_resolution_error());
    }
}
