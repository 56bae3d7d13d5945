use docflow::sales_order::optical_sales_order;
use docflow::{list_next_actions, list_states, CommitStatus, WorkflowDefinition};
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test]
fn optical_definition_round_trips_without_reordering() {
    let definition = optical_sales_order();
    let json = serde_json::to_string_pretty(&definition).unwrap();
    let back: WorkflowDefinition = serde_json::from_str(&json).unwrap();

    assert_eq!(definition, back);
    assert_eq!(list_states(&definition), list_states(&back));
    assert_eq!(
        list_next_actions(&definition, "Draft"),
        list_next_actions(&back, "Draft")
    );
    // Declared order survives: entry state and sibling evaluation order are
    // both derived from it
    assert_eq!(back.initial_state().name, "Draft");
    assert_eq!(back.transitions()[0].action, "Complete");
}

#[test]
fn states_appear_in_declaration_order() {
    let definition = optical_sales_order();
    assert_eq!(
        list_states(&definition),
        vec![
            "Draft",
            "Process Pending",
            "Processing at Branch",
            "With Special Order Incharge",
            "Ordered to Supplier",
            "Sent to HQM",
            "Processing at HQM",
            "Processing for Delivery",
            "In Transit (with Driver)",
            "Ready to Deliver",
            "Collected",
            "Cancelled",
        ]
    );
}

#[test_case("Draft", CommitStatus::Draft; "draft state is uncommitted")]
#[test_case("Sent to HQM", CommitStatus::Submitted; "processing states are committed")]
#[test_case("Collected", CommitStatus::Submitted; "collection keeps the order committed")]
#[test_case("Cancelled", CommitStatus::Cancelled; "cancellation state is cancelled")]
fn state_commit_status(name: &str, expected: CommitStatus) {
    let definition = optical_sales_order();
    assert_eq!(definition.state(name).unwrap().doc_status, expected);
}

#[test_case("Process Pending", &["Complete", "Cancel"]; "branch queue")]
#[test_case("Processing at HQM", &["Proceed to Deliver", "Cancel"]; "hqm lab")]
#[test_case("In Transit (with Driver)", &["Accept", "Reject", "Cancel"]; "in transit")]
#[test_case("Collected", &[]; "terminal collection")]
fn next_actions_per_state(state: &str, expected: &[&str]) {
    let definition = optical_sales_order();
    assert_eq!(list_next_actions(&definition, state), expected);
}

#[test]
fn deserialization_rejects_duplicate_states() {
    let json = r#"{
        "name": "Broken",
        "document_type": "Sales Order",
        "states": [
            {"name": "Draft", "style": "Danger", "doc_status": "Draft", "editable_by": "Sales User"},
            {"name": "Draft", "style": "Warning", "doc_status": "Draft", "editable_by": "Sales User"}
        ]
    }"#;
    let err = serde_json::from_str::<WorkflowDefinition>(json).unwrap_err();
    assert!(err.to_string().contains("duplicate state name"));
}

#[test]
fn deserialization_applies_state_field_default() {
    let json = r#"{
        "name": "Defaulted",
        "document_type": "Sales Order",
        "states": [
            {"name": "Draft", "style": "Danger", "doc_status": "Draft", "editable_by": "Sales User"}
        ]
    }"#;
    let definition: WorkflowDefinition = serde_json::from_str(json).unwrap();
    assert_eq!(definition.state_field(), "workflow_state");
    assert!(definition.transitions().is_empty());
}
