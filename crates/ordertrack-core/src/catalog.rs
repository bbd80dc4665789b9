//! The fixed fulfillment pipeline.
//!
//! Thirteen stages, from order placement to the customer's final
//! confirmation. Changing the catalog is a deployment-time decision;
//! running projects keep the names they were created with because
//! `step_name` is denormalized onto each step row.

/// Canonical pipeline stages, in order.
const STAGES: &[(i64, &str)] = &[
    (1, "Order Received"),
    (2, "Contract Signed"),
    (3, "Advance Payment Received"),
    (4, "Order Placed in China"),
    (5, "Items Stored in China Warehouse"),
    (6, "Items Sent to Cargo Ship"),
    (7, "Goods Clearance Permit (China)"),
    (8, "Shipped to Dubai Port"),
    (9, "Arrived at Dubai Port"),
    (10, "Loaded on Ship to Iran"),
    (11, "Goods Clearance Permit (Iran)"),
    (12, "Delivered to User Warehouse in Iran"),
    (13, "Final Confirmation from User"),
];

/// Ordered `(step_number, step_name)` definitions.
pub fn definitions() -> &'static [(i64, &'static str)] {
    STAGES
}

/// Name of the first stage; new projects start here.
pub fn first_stage() -> &'static str {
    STAGES[0].1
}

/// Number of stages in the pipeline.
pub fn stage_count() -> i64 {
    STAGES.len() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirteen_contiguous_stages() {
        assert_eq!(stage_count(), 13);
        for (index, (number, name)) in definitions().iter().enumerate() {
            assert_eq!(*number, index as i64 + 1);
            assert!(!name.is_empty());
        }
    }

    #[test]
    fn pipeline_endpoints() {
        assert_eq!(first_stage(), "Order Received");
        assert_eq!(definitions()[12].1, "Final Confirmation from User");
    }
}
