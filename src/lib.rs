//! # Docflow
//!
//! Workflow transition engine for business documents.
//!
//! A document moves through a lifecycle of named states via explicit,
//! role-gated, conditionally guarded actions. This crate provides the
//! building blocks for that movement:
//! - **Workflow Definition**: immutable states and transitions for one document type
//! - **Conditions**: a small, safe boolean expression AST over document fields
//! - **Resolution**: picking the single applicable transition for a state, action, and document
//! - **Authorization**: role gating with a maker-checker self-approval restriction
//! - **Application**: committing the new state, keeping commit status in sync, batched per document
//! - **Queries**: static views of states and legal next actions
//!
//! ## Design Principles
//!
//! 1. **Declarative Definitions**: states and transitions are data, built once and shared immutably
//! 2. **Order Matters**: declaration order drives entry state and condition evaluation
//! 3. **Surfaced Ambiguity**: two matching transitions are a definition bug, never "first wins"
//! 4. **Pure Decisions**: resolution and authorization never touch I/O; collaborators live at the applier boundary
//! 5. **Partial Failure**: batch application reports each document's outcome independently
//!
//! ## Example
//!
//! ```rust
//! use docflow::{
//!     ActorId, CommitStatus, Document, DocumentId, InMemoryAuthorizationProvider,
//!     InMemoryDocumentStore, State, StateStyle, Transition, WorkflowApplier,
//!     WorkflowDefinition,
//! };
//! use std::sync::Arc;
//!
//! let definition = Arc::new(
//!     WorkflowDefinition::builder("Review", "Report")
//!         .state(State::new("Draft", StateStyle::Danger, CommitStatus::Draft, "Author"))
//!         .state(State::new("Published", StateStyle::Success, CommitStatus::Submitted, "Editor"))
//!         .transition(Transition::new("Draft", "Publish", "Published", "Editor"))
//!         .build()
//!         .unwrap(),
//! );
//!
//! let store = InMemoryDocumentStore::new();
//! store.insert(Document::new("REP-0001").with_field("workflow_state", "Draft"));
//! let auth = InMemoryAuthorizationProvider::new();
//! auth.grant_role("ed", "Editor");
//!
//! let applier = WorkflowApplier::new(definition, store, auth);
//! let applied = applier
//!     .apply(&DocumentId::new("REP-0001"), "Publish", &ActorId::new("ed"))
//!     .unwrap();
//! assert_eq!(applied.to_state, "Published");
//! ```

#![warn(missing_docs)]

mod applier;
mod authorization;
mod condition;
mod definition;
mod document;
mod errors;
mod query;
mod resolver;
mod store;

pub mod sales_order;

// Re-export core types
pub use applier::{ActionOutcome, AppliedTransition, HandlerAssignment, WorkflowApplier};
pub use authorization::{
    authorize, ActorId, AuthorizationProvider, InMemoryAuthorizationProvider, TransitionContext,
};
pub use condition::Condition;
pub use definition::{
    Role, State, StateStyle, Transition, WorkflowDefinition, WorkflowDefinitionBuilder,
};
pub use document::{CommitStatus, Document, DocumentId, FieldReader, FieldValue};
pub use errors::{ApplyError, AuthError, DefinitionError, EvaluationError, ResolutionError};
pub use query::{list_next_actions, list_states};
pub use resolver::resolve;
pub use store::{DocumentStore, InMemoryDocumentStore};
