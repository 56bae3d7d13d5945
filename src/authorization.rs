// Copyright 2025 Cowboy AI, LLC.

//! Authorization gate
//!
//! A resolved transition is only executed for an actor holding the
//! transition's role, and — unless the transition explicitly allows
//! self-approval — only for an actor other than the document's original
//! submitter. Role match is necessary but not sufficient; the self-approval
//! restriction implements maker-checker segregation of duties.

use crate::definition::{Role, Transition};
use crate::document::{Document, DocumentId};
use crate::errors::AuthError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Identifier of the actor requesting a transition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(String);

impl ActorId {
    /// Create an actor id
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the actor name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActorId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ActorId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Ephemeral per-invocation context for the authorization gate
///
/// Built fresh for each document an action is applied to; never persisted.
#[derive(Debug, Clone)]
pub struct TransitionContext {
    actor: ActorId,
    roles: HashSet<Role>,
    is_original_submitter: bool,
}

impl TransitionContext {
    /// Create a context for an actor with no roles
    pub fn new(actor: impl Into<ActorId>) -> Self {
        Self {
            actor: actor.into(),
            roles: HashSet::new(),
            is_original_submitter: false,
        }
    }

    /// Add a role the actor holds
    pub fn with_role(mut self, role: impl Into<Role>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Replace the actor's role set
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    /// Record whether the actor originally submitted the document
    pub fn submitted_by_actor(mut self, is_original_submitter: bool) -> Self {
        self.is_original_submitter = is_original_submitter;
        self
    }

    /// Get the actor
    pub fn actor(&self) -> &ActorId {
        &self.actor
    }

    /// Check whether the actor holds a role
    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// Whether the actor originally submitted the document
    pub fn is_original_submitter(&self) -> bool {
        self.is_original_submitter
    }
}

/// Check whether the context's actor may execute a resolved transition
pub fn authorize(transition: &Transition, context: &TransitionContext) -> Result<(), AuthError> {
    if !context.has_role(&transition.allowed) {
        return Err(AuthError::RoleMismatch {
            required: transition.allowed.clone(),
        });
    }

    if context.is_original_submitter() && !transition.allow_self_approval {
        return Err(AuthError::SelfApprovalDenied {
            action: transition.action.clone(),
        });
    }

    Ok(())
}

/// Collaborator supplying actor roles and submitter facts
///
/// Implemented by the caller over its identity source; the applier queries it
/// once per document to build a [`TransitionContext`].
pub trait AuthorizationProvider: Send + Sync {
    /// Roles held by the actor
    fn roles_of(&self, actor: &ActorId) -> Result<HashSet<Role>, String>;

    /// Whether the actor originally submitted the document
    fn is_original_submitter(&self, actor: &ActorId, document: &Document)
        -> Result<bool, String>;
}

/// In-memory authorization provider for testing and embedding
#[derive(Clone, Default)]
pub struct InMemoryAuthorizationProvider {
    roles: Arc<RwLock<HashMap<ActorId, HashSet<Role>>>>,
    submitters: Arc<RwLock<HashMap<DocumentId, ActorId>>>,
}

impl InMemoryAuthorizationProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a role to an actor
    pub fn grant_role(&self, actor: impl Into<ActorId>, role: impl Into<Role>) {
        self.roles
            .write()
            .unwrap()
            .entry(actor.into())
            .or_default()
            .insert(role.into());
    }

    /// Record which actor originally submitted a document
    pub fn record_submitter(&self, document: impl Into<DocumentId>, actor: impl Into<ActorId>) {
        self.submitters
            .write()
            .unwrap()
            .insert(document.into(), actor.into());
    }
}

impl AuthorizationProvider for InMemoryAuthorizationProvider {
    fn roles_of(&self, actor: &ActorId) -> Result<HashSet<Role>, String> {
        Ok(self
            .roles
            .read()
            .unwrap()
            .get(actor)
            .cloned()
            .unwrap_or_default())
    }

    fn is_original_submitter(
        &self,
        actor: &ActorId,
        document: &Document,
    ) -> Result<bool, String> {
        Ok(self
            .submitters
            .read()
            .unwrap()
            .get(document.id())
            .is_some_and(|submitter| submitter == actor))
    }
}
