use docflow::sales_order::{optical_sales_order, ITEM_TYPE_FIELD, ORDER_TYPE_FIELD};
use docflow::{resolve, Document, ResolutionError};
use proptest::prelude::*;

fn order_types() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Eye Test".to_string()),
        Just("Sales".to_string()),
        Just("Repair".to_string()),
        Just("Exchange".to_string()),
    ]
}

fn item_types() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Standard".to_string()),
        Just("Special".to_string()),
        Just("Other".to_string()),
    ]
}

proptest! {
    // Resolution is a pure function of (definition, state, action, document):
    // resolving twice yields the same transition or the same error.
    #[test]
    fn resolution_is_deterministic(
        order_type in order_types(),
        item_type in item_types(),
        action in prop_oneof![
            Just("Complete"),
            Just("Process at Branch"),
            Just("Send to HQM"),
            Just("Send as Special Order"),
        ],
    ) {
        let definition = optical_sales_order();
        let doc = Document::new("SO-0001")
            .with_field(ORDER_TYPE_FIELD, order_type.as_str())
            .with_field(ITEM_TYPE_FIELD, item_type.as_str());

        let first = resolve(&definition, "Draft", action, &doc);
        let second = resolve(&definition, "Draft", action, &doc);
        prop_assert_eq!(first.map(|t| t.to_state.clone()), second.map(|t| t.to_state.clone()));
    }

    // The Draft siblings for "Process at Branch" carry mutually exclusive
    // conditions: any document resolves to at most one of them, and a
    // document satisfying neither is an illegal action, never an ambiguity.
    #[test]
    fn draft_branching_is_never_ambiguous(
        order_type in order_types(),
        item_type in item_types(),
    ) {
        let definition = optical_sales_order();
        let doc = Document::new("SO-0001")
            .with_field(ORDER_TYPE_FIELD, order_type.as_str())
            .with_field(ITEM_TYPE_FIELD, item_type.as_str());

        match resolve(&definition, "Draft", "Process at Branch", &doc) {
            Ok(transition) => {
                prop_assert!(
                    transition.to_state == "Process Pending"
                        || transition.to_state == "Processing at Branch"
                );
            }
            Err(ResolutionError::NoApplicableTransition { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    // Unconditioned transitions resolve identically for any document.
    #[test]
    fn unconditioned_resolution_ignores_fields(
        order_type in order_types(),
        item_type in item_types(),
    ) {
        let definition = optical_sales_order();
        let doc = Document::new("SO-0001")
            .with_field(ORDER_TYPE_FIELD, order_type.as_str())
            .with_field(ITEM_TYPE_FIELD, item_type.as_str());

        let transition = resolve(&definition, "Sent to HQM", "Process Order", &doc).unwrap();
        prop_assert_eq!(transition.to_state.as_str(), "Processing at HQM");
    }
}
