// Copyright 2025 Cowboy AI, LLC.

//! Workflow definitions
//!
//! A definition is the declarative description of one document type's
//! lifecycle: an ordered list of states and an ordered list of role-gated,
//! optionally conditioned transitions between them. Definitions are built
//! once, validated, and shared immutably across every resolver invocation.
//!
//! Declared order is semantically load-bearing: the first state is the entry
//! state, and transitions are evaluated in declaration order. Both lists are
//! therefore plain vectors, never maps, and serialization round-trips without
//! reordering.

use crate::condition::Condition;
use crate::document::CommitStatus;
use crate::errors::DefinitionError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A role name gating transitions and state editability
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Role(String);

impl Role {
    /// Create a role from its name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the role name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Visual tag attached to a state
///
/// Purely presentational; the engine never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum StateStyle {
    /// Red badge
    Danger,
    /// Amber badge
    Warning,
    /// Blue badge
    Primary,
    /// Teal badge
    Info,
    /// Green badge
    Success,
}

/// A named lifecycle state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct State {
    /// State name, unique within a definition
    pub name: String,
    /// Presentational style tag
    pub style: StateStyle,
    /// Commit status a document must carry while in this state
    pub doc_status: CommitStatus,
    /// Role allowed to edit documents in this state
    pub editable_by: Role,
    /// Marks states reachable only via cancellation paths
    #[serde(default)]
    pub is_optional: bool,
}

impl State {
    /// Create a new state
    pub fn new(
        name: impl Into<String>,
        style: StateStyle,
        doc_status: CommitStatus,
        editable_by: impl Into<Role>,
    ) -> Self {
        Self {
            name: name.into(),
            style,
            doc_status,
            editable_by: editable_by.into(),
            is_optional: false,
        }
    }

    /// Mark this state as reachable only via cancellation paths
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }
}

/// A guarded, role-gated edge between two states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transition {
    /// Source state name
    pub from_state: String,
    /// Action label a caller invokes to request this transition
    pub action: String,
    /// Target state name
    pub to_state: String,
    /// Role permitted to execute this transition
    pub allowed: Role,
    /// Whether the document's original submitter may execute it
    #[serde(default)]
    pub allow_self_approval: bool,
    /// Optional guard over document fields; absent means unconditional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Transition {
    /// Create an unconditional transition
    pub fn new(
        from_state: impl Into<String>,
        action: impl Into<String>,
        to_state: impl Into<String>,
        allowed: impl Into<Role>,
    ) -> Self {
        Self {
            from_state: from_state.into(),
            action: action.into(),
            to_state: to_state.into(),
            allowed: allowed.into(),
            allow_self_approval: false,
            condition: None,
        }
    }

    /// Add a guard condition
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Set whether the original submitter may execute this transition
    pub fn with_self_approval(mut self, allow: bool) -> Self {
        self.allow_self_approval = allow;
        self
    }
}

fn default_state_field() -> String {
    "workflow_state".to_string()
}

/// Immutable workflow definition for one document type
///
/// Constructed through [`WorkflowDefinition::builder`], which validates the
/// state/transition tables; deserialization runs the same validation, so a
/// definition in hand is always well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct WorkflowDefinition {
    name: String,
    document_type: String,
    state_field: String,
    states: Vec<State>,
    transitions: Vec<Transition>,
}

impl WorkflowDefinition {
    /// Start building a definition
    pub fn builder(
        name: impl Into<String>,
        document_type: impl Into<String>,
    ) -> WorkflowDefinitionBuilder {
        WorkflowDefinitionBuilder {
            name: name.into(),
            document_type: document_type.into(),
            state_field: default_state_field(),
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Get the definition name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the target document type
    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    /// Get the document field that stores the current state
    pub fn state_field(&self) -> &str {
        &self.state_field
    }

    /// Get the declared states, in declaration order
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Get the declared transitions, in declaration order
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Get the entry state (first declared)
    pub fn initial_state(&self) -> &State {
        // Validation guarantees at least one state
        &self.states[0]
    }

    /// Look up a state by name
    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|s| s.name == name)
    }

    /// Transitions starting from the given state, in declaration order
    pub fn transitions_from(&self, from_state: &str) -> Vec<&Transition> {
        self.transitions
            .iter()
            .filter(|t| t.from_state == from_state)
            .collect()
    }

    fn validate(&self) -> Result<(), DefinitionError> {
        if self.states.is_empty() {
            return Err(DefinitionError::NoStates);
        }

        let mut names = HashSet::new();
        for state in &self.states {
            if !names.insert(state.name.as_str()) {
                return Err(DefinitionError::DuplicateState(state.name.clone()));
            }
        }

        for transition in &self.transitions {
            if !names.contains(transition.from_state.as_str()) {
                return Err(DefinitionError::UnknownFromState {
                    state: transition.from_state.clone(),
                    action: transition.action.clone(),
                });
            }
            if !names.contains(transition.to_state.as_str()) {
                return Err(DefinitionError::UnknownToState {
                    state: transition.to_state.clone(),
                    action: transition.action.clone(),
                });
            }
        }

        Ok(())
    }
}

// Deserialization funnels through the same validation as the builder, so a
// loaded definition carries the builder's guarantees.
impl<'de> Deserialize<'de> for WorkflowDefinition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawDefinition {
            name: String,
            document_type: String,
            #[serde(default = "default_state_field")]
            state_field: String,
            states: Vec<State>,
            #[serde(default)]
            transitions: Vec<Transition>,
        }

        let raw = RawDefinition::deserialize(deserializer)?;
        let definition = WorkflowDefinition {
            name: raw.name,
            document_type: raw.document_type,
            state_field: raw.state_field,
            states: raw.states,
            transitions: raw.transitions,
        };
        definition.validate().map_err(serde::de::Error::custom)?;
        Ok(definition)
    }
}

/// Builder for [`WorkflowDefinition`]
pub struct WorkflowDefinitionBuilder {
    name: String,
    document_type: String,
    state_field: String,
    states: Vec<State>,
    transitions: Vec<Transition>,
}

impl WorkflowDefinitionBuilder {
    /// Override the document field that stores the current state
    pub fn state_field(mut self, field: impl Into<String>) -> Self {
        self.state_field = field.into();
        self
    }

    /// Declare a state; declaration order is preserved and the first state
    /// becomes the entry state
    pub fn state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    /// Declare a transition; declaration order drives condition evaluation
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Validate and build the definition
    pub fn build(self) -> Result<WorkflowDefinition, DefinitionError> {
        let definition = WorkflowDefinition {
            name: self.name,
            document_type: self.document_type,
            state_field: self.state_field,
            states: self.states,
            transitions: self.transitions,
        };
        definition.validate()?;
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;

    fn two_state_definition() -> WorkflowDefinition {
        WorkflowDefinition::builder("Review", "Report")
            .state(State::new(
                "Draft",
                StateStyle::Danger,
                CommitStatus::Draft,
                "Author",
            ))
            .state(State::new(
                "Published",
                StateStyle::Success,
                CommitStatus::Submitted,
                "Editor",
            ))
            .transition(Transition::new("Draft", "Publish", "Published", "Editor"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_accessors() {
        let definition = two_state_definition();
        assert_eq!(definition.name(), "Review");
        assert_eq!(definition.document_type(), "Report");
        assert_eq!(definition.state_field(), "workflow_state");
        assert_eq!(definition.initial_state().name, "Draft");
        assert!(definition.state("Published").is_some());
        assert!(definition.state("Limbo").is_none());
        assert_eq!(definition.transitions_from("Draft").len(), 1);
        assert!(definition.transitions_from("Published").is_empty());
    }

    #[test]
    fn test_empty_definition_rejected() {
        let err = WorkflowDefinition::builder("Empty", "Nothing")
            .build()
            .unwrap_err();
        assert_eq!(err, DefinitionError::NoStates);
    }

    #[test]
    fn test_duplicate_state_rejected() {
        let err = WorkflowDefinition::builder("Dup", "Report")
            .state(State::new(
                "Draft",
                StateStyle::Danger,
                CommitStatus::Draft,
                "Author",
            ))
            .state(State::new(
                "Draft",
                StateStyle::Warning,
                CommitStatus::Draft,
                "Author",
            ))
            .build()
            .unwrap_err();
        assert_eq!(err, DefinitionError::DuplicateState("Draft".to_string()));
    }

    #[test]
    fn test_dangling_transition_rejected() {
        let err = WorkflowDefinition::builder("Dangling", "Report")
            .state(State::new(
                "Draft",
                StateStyle::Danger,
                CommitStatus::Draft,
                "Author",
            ))
            .transition(Transition::new("Draft", "Publish", "Published", "Editor"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::UnknownToState {
                state: "Published".to_string(),
                action: "Publish".to_string(),
            }
        );
    }

    #[test]
    fn test_serde_round_trip_preserves_order() {
        let definition = WorkflowDefinition::builder("Ordered", "Report")
            .state(State::new(
                "Zulu",
                StateStyle::Danger,
                CommitStatus::Draft,
                "Author",
            ))
            .state(State::new(
                "Alpha",
                StateStyle::Success,
                CommitStatus::Submitted,
                "Editor",
            ))
            .transition(
                Transition::new("Zulu", "Go", "Alpha", "Editor")
                    .with_condition(Condition::eq("kind", "fast")),
            )
            .transition(Transition::new("Zulu", "Go", "Alpha", "Editor"))
            .build()
            .unwrap();

        let json = serde_json::to_string_pretty(&definition).unwrap();
        let back: WorkflowDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(definition, back);
        // Declaration order survives, it is not alphabetized
        assert_eq!(back.initial_state().name, "Zulu");
        assert!(back.transitions()[0].condition.is_some());
        assert!(back.transitions()[1].condition.is_none());
    }

    #[test]
    fn test_deserialization_validates() {
        let json = r#"{
            "name": "Broken",
            "document_type": "Report",
            "states": [
                {"name": "Draft", "style": "Danger", "doc_status": "Draft", "editable_by": "Author"}
            ],
            "transitions": [
                {"from_state": "Draft", "action": "Publish", "to_state": "Gone", "allowed": "Editor"}
            ]
        }"#;
        let err = serde_json::from_str::<WorkflowDefinition>(json).unwrap_err();
        assert!(err.to_string().contains("undeclared state"));
    }
}
