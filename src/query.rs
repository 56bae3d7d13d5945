//! Read-only views over a workflow definition
//!
//! Static queries: what states exist, and which actions could leave a given
//! state. Deliberately not filtered by document or role — no document is in
//! hand, so conditions are not evaluated.

use crate::definition::WorkflowDefinition;

/// List state names in declaration order
pub fn list_states(definition: &WorkflowDefinition) -> Vec<&str> {
    definition.states().iter().map(|s| s.name.as_str()).collect()
}

/// List the distinct actions with at least one transition from a state
///
/// First-occurrence order; an action backed by several conditioned
/// transitions appears once.
pub fn list_next_actions<'a>(definition: &'a WorkflowDefinition, state: &str) -> Vec<&'a str> {
    let mut actions: Vec<&str> = Vec::new();
    for transition in definition.transitions_from(state) {
        if !actions.contains(&transition.action.as_str()) {
            actions.push(transition.action.as_str());
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::definition::{State, StateStyle, Transition};
    use crate::document::CommitStatus;

    fn definition() -> WorkflowDefinition {
        WorkflowDefinition::builder("Orders", "Sales Order")
            .state(State::new(
                "Draft",
                StateStyle::Danger,
                CommitStatus::Draft,
                "Sales User",
            ))
            .state(State::new(
                "Pending",
                StateStyle::Warning,
                CommitStatus::Submitted,
                "Sales User",
            ))
            .state(State::new(
                "Done",
                StateStyle::Success,
                CommitStatus::Submitted,
                "Sales User",
            ))
            .transition(
                Transition::new("Draft", "Process", "Pending", "Sales User")
                    .with_condition(Condition::eq("kind", "slow")),
            )
            .transition(
                Transition::new("Draft", "Process", "Done", "Sales User")
                    .with_condition(Condition::eq("kind", "fast")),
            )
            .transition(Transition::new("Draft", "Complete", "Done", "Sales User"))
            .transition(Transition::new("Pending", "Complete", "Done", "Sales User"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_list_states_declaration_order() {
        assert_eq!(list_states(&definition()), vec!["Draft", "Pending", "Done"]);
    }

    #[test]
    fn test_list_next_actions_distinct() {
        // "Process" has two conditioned transitions from Draft, listed once
        assert_eq!(
            list_next_actions(&definition(), "Draft"),
            vec!["Process", "Complete"]
        );
        assert_eq!(list_next_actions(&definition(), "Pending"), vec!["Complete"]);
        assert!(list_next_actions(&definition(), "Done").is_empty());
        assert!(list_next_actions(&definition(), "Limbo").is_empty());
    }
}
