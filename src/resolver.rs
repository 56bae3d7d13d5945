// Copyright 2025 Cowboy AI, LLC.

//! Transition resolution
//!
//! Given a definition, a document's current state, and a requested action,
//! resolution picks the single applicable transition. Action names are not
//! uniquely keyed by `(state, action)`: sibling transitions share the pair
//! and are disambiguated by mutually exclusive conditions, so resolution is
//! a linear filter-and-evaluate over the declared transition list, never a
//! map lookup.

use crate::definition::{Transition, WorkflowDefinition};
use crate::document::FieldReader;
use crate::errors::ResolutionError;
use tracing::debug;

/// Resolve the single transition applicable to a document
///
/// Candidate transitions are those declared from `current_state` with the
/// requested action. Conditioned candidates are evaluated in declaration
/// order; an unconditioned candidate is a default that applies only when no
/// conditioned sibling matched. Exactly one transition must survive:
/// zero is [`ResolutionError::NoApplicableTransition`], more than one is
/// [`ResolutionError::AmbiguousTransition`] — an authoring bug that is
/// surfaced, never resolved by silently taking the first.
pub fn resolve<'a>(
    definition: &'a WorkflowDefinition,
    current_state: &str,
    action: &str,
    doc: &dyn FieldReader,
) -> Result<&'a Transition, ResolutionError> {
    if definition.state(current_state).is_none() {
        return Err(ResolutionError::UnknownState {
            state: current_state.to_string(),
        });
    }

    let mut conditioned = Vec::new();
    let mut defaults = Vec::new();
    for transition in definition.transitions_from(current_state) {
        if transition.action != action {
            continue;
        }
        match &transition.condition {
            Some(condition) => {
                if condition.evaluate(doc)? {
                    conditioned.push(transition);
                }
            }
            None => defaults.push(transition),
        }
    }

    let matched = if conditioned.is_empty() {
        defaults
    } else {
        conditioned
    };

    match matched.len() {
        0 => Err(ResolutionError::NoApplicableTransition {
            state: current_state.to_string(),
            action: action.to_string(),
        }),
        1 => {
            let transition = matched[0];
            debug!(
                from = %transition.from_state,
                action = %transition.action,
                to = %transition.to_state,
                "transition resolved"
            );
            Ok(transition)
        }
        n => Err(ResolutionError::AmbiguousTransition {
            state: current_state.to_string(),
            action: action.to_string(),
            matched: n,
        }),
    }
}
