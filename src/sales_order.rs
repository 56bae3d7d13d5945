//! Optical store sales order workflow
//!
//! The shipped reference definition: a retail optical chain's sales order
//! lifecycle, from draft through branch or head-office processing to
//! collection, with a cancellation path out of every processing state.
//!
//! Orders branch at Draft on their order and item types: eye tests complete
//! immediately, stock sales process at the branch, special items go through
//! the special-order incharge and a supplier, and repairs or standard sales
//! can be routed to head-office manufacturing (HQM). Collection requires the
//! order to be fully delivered.

use crate::condition::Condition;
use crate::definition::{State, StateStyle, Transition, WorkflowDefinition};
use crate::document::CommitStatus;

/// Order type field conditions branch on
pub const ORDER_TYPE_FIELD: &str = "os_order_type";
/// Item type field
pub const ITEM_TYPE_FIELD: &str = "os_item_type";
/// Delivery status field gating collection
pub const DELIVERY_STATUS_FIELD: &str = "delivery_status";
/// Lab technician assignment field written on delivery handover
pub const LAB_TECH_FIELD: &str = "os_lab_tech";
/// The delivery-handover action that triggers lab technician assignment
pub const HANDOVER_ACTION: &str = "Proceed to Deliver";

fn repair_or_standard_sale() -> Condition {
    Condition::eq(ORDER_TYPE_FIELD, "Repair").or(Condition::eq(ORDER_TYPE_FIELD, "Sales")
        .and(Condition::eq(ITEM_TYPE_FIELD, "Standard")))
}

/// Build the optical store sales order workflow definition
pub fn optical_sales_order() -> WorkflowDefinition {
    WorkflowDefinition::builder("Optic Store Sales Order", "Sales Order")
        .state(State::new(
            "Draft",
            StateStyle::Danger,
            CommitStatus::Draft,
            "Sales User",
        ))
        .state(State::new(
            "Process Pending",
            StateStyle::Warning,
            CommitStatus::Submitted,
            "Sales User",
        ))
        .state(State::new(
            "Processing at Branch",
            StateStyle::Primary,
            CommitStatus::Submitted,
            "Sales User",
        ))
        .state(State::new(
            "With Special Order Incharge",
            StateStyle::Warning,
            CommitStatus::Submitted,
            "Store User",
        ))
        .state(State::new(
            "Ordered to Supplier",
            StateStyle::Warning,
            CommitStatus::Submitted,
            "Store User",
        ))
        .state(State::new(
            "Sent to HQM",
            StateStyle::Warning,
            CommitStatus::Submitted,
            "Store User",
        ))
        .state(State::new(
            "Processing at HQM",
            StateStyle::Primary,
            CommitStatus::Submitted,
            "Lab Tech",
        ))
        .state(State::new(
            "Processing for Delivery",
            StateStyle::Info,
            CommitStatus::Submitted,
            "Store User",
        ))
        .state(State::new(
            "In Transit (with Driver)",
            StateStyle::Warning,
            CommitStatus::Submitted,
            "Sales User",
        ))
        .state(State::new(
            "Ready to Deliver",
            StateStyle::Info,
            CommitStatus::Submitted,
            "Sales User",
        ))
        .state(State::new(
            "Collected",
            StateStyle::Success,
            CommitStatus::Submitted,
            "Sales User",
        ))
        .state(
            State::new(
                "Cancelled",
                StateStyle::Danger,
                CommitStatus::Cancelled,
                "Sales User",
            )
            .optional(),
        )
        // Draft branches on order/item type
        .transition(
            Transition::new("Draft", "Complete", "Ready to Deliver", "Sales User")
                .with_self_approval(true)
                .with_condition(Condition::eq(ORDER_TYPE_FIELD, "Eye Test")),
        )
        .transition(
            Transition::new("Draft", "Process at Branch", "Process Pending", "Sales User")
                .with_self_approval(true)
                .with_condition(
                    Condition::eq(ORDER_TYPE_FIELD, "Sales")
                        .and(Condition::eq(ITEM_TYPE_FIELD, "Other")),
                ),
        )
        .transition(
            Transition::new(
                "Draft",
                "Process at Branch",
                "Processing at Branch",
                "Sales User",
            )
            .with_self_approval(true)
            .with_condition(repair_or_standard_sale()),
        )
        .transition(
            Transition::new("Draft", "Send to HQM", "Sent to HQM", "Sales User")
                .with_self_approval(true)
                .with_condition(repair_or_standard_sale()),
        )
        .transition(
            Transition::new(
                "Draft",
                "Send as Special Order",
                "With Special Order Incharge",
                "Sales User",
            )
            .with_self_approval(true)
            .with_condition(
                Condition::eq(ORDER_TYPE_FIELD, "Sales")
                    .and(Condition::eq(ITEM_TYPE_FIELD, "Special")),
            ),
        )
        // Branch processing
        .transition(
            Transition::new("Process Pending", "Complete", "Ready to Deliver", "Sales User")
                .with_self_approval(true),
        )
        .transition(
            Transition::new("Process Pending", "Cancel", "Cancelled", "Sales User")
                .with_self_approval(true),
        )
        .transition(
            Transition::new(
                "Processing at Branch",
                "Complete",
                "Ready to Deliver",
                "Sales User",
            )
            .with_self_approval(true),
        )
        .transition(
            Transition::new("Processing at Branch", "Cancel", "Cancelled", "Sales User")
                .with_self_approval(true),
        )
        // Special orders
        .transition(
            Transition::new(
                "With Special Order Incharge",
                "Order to Supplier",
                "Ordered to Supplier",
                "Store User",
            )
            .with_self_approval(true),
        )
        .transition(
            Transition::new(
                "With Special Order Incharge",
                "Cancel",
                "Cancelled",
                "Store User",
            )
            .with_self_approval(true),
        )
        .transition(
            Transition::new(
                "Ordered to Supplier",
                "Process Order",
                "Processing at HQM",
                "Store User",
            )
            .with_self_approval(true),
        )
        .transition(
            Transition::new("Ordered to Supplier", "Cancel", "Cancelled", "Store User")
                .with_self_approval(true),
        )
        // Head office manufacturing
        .transition(
            Transition::new("Sent to HQM", "Process Order", "Processing at HQM", "Store User")
                .with_self_approval(true),
        )
        .transition(
            Transition::new("Sent to HQM", "Cancel", "Cancelled", "Store User")
                .with_self_approval(true),
        )
        .transition(
            Transition::new(
                "Processing at HQM",
                HANDOVER_ACTION,
                "Processing for Delivery",
                "Lab Tech",
            )
            .with_self_approval(true),
        )
        .transition(
            Transition::new("Processing at HQM", "Cancel", "Cancelled", "Lab Tech")
                .with_self_approval(true),
        )
        // Delivery
        .transition(
            Transition::new(
                "Processing for Delivery",
                "Send to Branch",
                "In Transit (with Driver)",
                "Store User",
            )
            .with_self_approval(true),
        )
        .transition(
            Transition::new("Processing for Delivery", "Cancel", "Cancelled", "Store User")
                .with_self_approval(true),
        )
        .transition(
            Transition::new(
                "In Transit (with Driver)",
                "Accept",
                "Ready to Deliver",
                "Sales User",
            )
            .with_self_approval(true),
        )
        .transition(
            Transition::new(
                "In Transit (with Driver)",
                "Reject",
                "Processing at HQM",
                "Sales User",
            )
            .with_self_approval(true),
        )
        .transition(
            Transition::new("In Transit (with Driver)", "Cancel", "Cancelled", "Sales User")
                .with_self_approval(true),
        )
        // Collection
        .transition(
            Transition::new("Ready to Deliver", "Complete", "Collected", "Sales User")
                .with_self_approval(true)
                .with_condition(Condition::eq(DELIVERY_STATUS_FIELD, "Fully Delivered")),
        )
        .transition(
            Transition::new("Ready to Deliver", "Cancel", "Cancelled", "Sales User")
                .with_self_approval(true),
        )
        .build()
        .expect("sales order workflow tables are well-formed")
}
