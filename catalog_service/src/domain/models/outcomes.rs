//! Results of storage and service operations that are not errors.

use models_catalog::api::ReconcileResponse;
use models_catalog::service::{AttributeDefinition, AttributeValue, AttributeWithValues};

/// Result of persisting a new attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateAttributeOutcome {
    Created(AttributeWithValues),
    /// Another definition already carries the name
    DuplicateName,
}

/// Result of patching an attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAttributeOutcome {
    Updated(AttributeDefinition),
    NotFound,
    DuplicateName,
}

/// Result of adding a value to an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddValueOutcome {
    Added(AttributeValue),
    DuplicateValue,
}

/// Result of deleting a definition or a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    /// Bindings still reference the row; nothing was removed
    StillReferenced { binding_count: i64 },
}

/// Write counts of one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub inserted: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

impl ReconcileOutcome {
    /// true if the call changed nothing
    pub fn is_noop(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}

impl From<ReconcileOutcome> for ReconcileResponse {
    fn from(outcome: ReconcileOutcome) -> Self {
        Self {
            inserted: outcome.inserted,
            deleted: outcome.deleted,
            unchanged: outcome.unchanged,
        }
    }
}
