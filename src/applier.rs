// Copyright 2025 Cowboy AI, LLC.

//! Workflow application
//!
//! The applier is the only component that touches collaborators: it fetches
//! the document, resolves and authorizes the transition, re-checks the state
//! field immediately before commit, synchronizes the document's commit
//! status with the target state, and writes the new state. Batch application
//! runs the same pipeline per document; one document's failure never aborts
//! the rest of the batch.

use crate::authorization::{authorize, ActorId, AuthorizationProvider, TransitionContext};
use crate::definition::WorkflowDefinition;
use crate::document::{CommitStatus, DocumentId, FieldValue};
use crate::errors::{ApplyError, ResolutionError};
use crate::resolver::resolve;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Record of a successfully applied transition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedTransition {
    /// Document the transition was applied to
    pub document_id: DocumentId,
    /// Action that was invoked
    pub action: String,
    /// State the document was in
    pub from_state: String,
    /// State the document is now in
    pub to_state: String,
    /// Commit status the document carries after the transition
    pub commit_status: CommitStatus,
    /// Unique identifier for this application
    pub transition_id: Uuid,
    /// When the transition was applied
    pub applied_at: DateTime<Utc>,
}

/// Per-document outcome of a batch application
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    /// The transition was applied
    Applied(AppliedTransition),
    /// The action was rejected for this document
    Rejected {
        /// Document the action was rejected for
        document_id: DocumentId,
        /// Why it was rejected
        error: ApplyError,
    },
}

impl ActionOutcome {
    /// Document this outcome belongs to
    pub fn document_id(&self) -> &DocumentId {
        match self {
            ActionOutcome::Applied(applied) => &applied.document_id,
            ActionOutcome::Rejected { document_id, .. } => document_id,
        }
    }

    /// Whether the transition was applied
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied(_))
    }

    /// The rejection error, if any
    pub fn error(&self) -> Option<&ApplyError> {
        match self {
            ActionOutcome::Applied(_) => None,
            ActionOutcome::Rejected { error, .. } => Some(error),
        }
    }
}

/// Auxiliary field written on successfully transitioned documents
///
/// Used for the delivery-handover action, which assigns a handler (e.g. a
/// lab technician) on each document it moves, as an additional write
/// independent of state resolution.
#[derive(Debug, Clone)]
pub struct HandlerAssignment {
    /// Action the assignment is tied to
    pub action: String,
    /// Field to write
    pub field: String,
    /// Value to assign
    pub value: FieldValue,
}

impl HandlerAssignment {
    /// Create an assignment tied to an action
    pub fn new(
        action: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        Self {
            action: action.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Applies workflow actions to documents through the store
///
/// Holds the shared immutable definition plus the two collaborators. All
/// steps for a single document are serialized; documents in a batch are
/// independent of each other.
pub struct WorkflowApplier<S, A>
where
    S: DocumentStore,
    A: AuthorizationProvider,
{
    definition: Arc<WorkflowDefinition>,
    store: S,
    auth: A,
}

impl<S, A> WorkflowApplier<S, A>
where
    S: DocumentStore,
    A: AuthorizationProvider,
{
    /// Create an applier over a definition and its collaborators
    pub fn new(definition: Arc<WorkflowDefinition>, store: S, auth: A) -> Self {
        Self {
            definition,
            store,
            auth,
        }
    }

    /// Get the definition this applier executes
    pub fn definition(&self) -> &WorkflowDefinition {
        &self.definition
    }

    /// Apply an action to a single document
    ///
    /// Pipeline: fetch, resolve, authorize, concurrency re-check, commit
    /// status sync, state write. The re-check aborts with
    /// [`ApplyError::ConcurrentModification`] if the state field moved
    /// between resolution and commit; the caller may retry by re-applying
    /// against the fresh state.
    pub fn apply(
        &self,
        id: &DocumentId,
        action: &str,
        actor: &ActorId,
    ) -> Result<AppliedTransition, ApplyError> {
        let document = self
            .store
            .get(id)
            .map_err(ApplyError::Store)?
            .ok_or_else(|| ApplyError::DocumentNotFound(id.clone()))?;

        let state_field = self.definition.state_field();
        let current = document
            .state(state_field)
            .ok_or_else(|| ApplyError::MissingStateField {
                field: state_field.to_string(),
            })?
            .to_string();

        let transition = resolve(&self.definition, &current, action, &document)?;

        let roles = self.auth.roles_of(actor).map_err(ApplyError::Provider)?;
        let is_submitter = self
            .auth
            .is_original_submitter(actor, &document)
            .map_err(ApplyError::Provider)?;
        let context = TransitionContext::new(actor.clone())
            .with_roles(roles)
            .submitted_by_actor(is_submitter);
        authorize(transition, &context)?;

        // Optimistic concurrency: the state must not have moved since the
        // snapshot the transition was resolved against.
        let fresh = self
            .store
            .get(id)
            .map_err(ApplyError::Store)?
            .ok_or_else(|| ApplyError::DocumentNotFound(id.clone()))?;
        let found = fresh
            .state(state_field)
            .ok_or_else(|| ApplyError::MissingStateField {
                field: state_field.to_string(),
            })?;
        if found != current {
            return Err(ApplyError::ConcurrentModification {
                expected: current,
                found: found.to_string(),
            });
        }

        let to_state = self
            .definition
            .state(&transition.to_state)
            .ok_or_else(|| {
                ApplyError::Resolution(ResolutionError::UnknownState {
                    state: transition.to_state.clone(),
                })
            })?;

        if to_state.doc_status != fresh.commit_status() {
            self.store
                .set_commit_status(id, to_state.doc_status)
                .map_err(ApplyError::Store)?;
        }
        self.store
            .set_field(id, state_field, FieldValue::from(transition.to_state.as_str()))
            .map_err(ApplyError::Store)?;

        info!(
            document = %id,
            action,
            from = %current,
            to = %transition.to_state,
            "workflow transition applied"
        );

        Ok(AppliedTransition {
            document_id: id.clone(),
            action: action.to_string(),
            from_state: current,
            to_state: transition.to_state.clone(),
            commit_status: to_state.doc_status,
            transition_id: Uuid::new_v4(),
            applied_at: Utc::now(),
        })
    }

    /// Apply an action to a batch of documents
    ///
    /// Each document is resolved, authorized, and applied independently;
    /// failures are reported per document and never abort the remaining
    /// items. Outcomes are returned in input order. When an assignment is
    /// given and its action matches, the auxiliary field is written on each
    /// successfully transitioned document.
    pub fn apply_many(
        &self,
        ids: &[DocumentId],
        action: &str,
        actor: &ActorId,
        assignment: Option<&HandlerAssignment>,
    ) -> Vec<ActionOutcome> {
        ids.iter()
            .map(|id| match self.apply(id, action, actor) {
                Ok(applied) => {
                    if let Some(assignment) = assignment.filter(|a| a.action == action) {
                        if let Err(message) =
                            self.store
                                .set_field(id, &assignment.field, assignment.value.clone())
                        {
                            warn!(document = %id, "handler assignment failed: {message}");
                            return ActionOutcome::Rejected {
                                document_id: id.clone(),
                                error: ApplyError::Store(message),
                            };
                        }
                    }
                    ActionOutcome::Applied(applied)
                }
                Err(error) => {
                    warn!(document = %id, action, %error, "workflow action rejected");
                    ActionOutcome::Rejected {
                        document_id: id.clone(),
                        error,
                    }
                }
            })
            .collect()
    }
}
