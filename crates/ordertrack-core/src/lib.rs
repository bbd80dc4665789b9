//! Ordertrack Core
//!
//! Domain models and the order-step workflow engine: the fixed
//! fulfillment pipeline, access policy, sequential step advancement
//! and notification dispatch.

pub mod actor;
pub mod catalog;
pub mod error;
pub mod identity;
pub mod notify;
pub mod policy;
pub mod project;
pub mod workflow;

pub use error::{TrackError, TrackResult};

/// Offset/limit pagination for list operations.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Pagination {
    /// Offset clamped to zero. Query strings can carry negative
    /// numbers; a negative offset reads from the start.
    pub fn offset(&self) -> i64 {
        self.offset.max(0)
    }

    /// Limit clamped to zero. SQLite treats a negative LIMIT as
    /// unlimited, which must not be reachable from a query string.
    pub fn limit(&self) -> i64 {
        self.limit.max(0)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: default_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_negative_values() {
        let page = Pagination {
            offset: -5,
            limit: -1,
        };
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 0);

        let page = Pagination::default();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 100);
    }
}
