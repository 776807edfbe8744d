//! Domain error types

use models_catalog::service::Violation;
use thiserror::Error;

/// Domain-level errors for catalog and reconciliation operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// One or more referenced attribute definitions do not exist
    #[error("attribute not found: {0:?}")]
    AttributeNotFound(Vec<i64>),

    /// The value does not exist or is owned by another attribute
    #[error("attribute {attribute_id} has no value {value_id}")]
    AttributeValueNotFound { attribute_id: i64, value_id: i64 },

    #[error("an attribute named {0:?} already exists")]
    DuplicateName(String),

    #[error("attribute {attribute_id} already has a value {value:?}")]
    DuplicateValue { attribute_id: i64, value: String },

    #[error("attribute {attribute_id} is still referenced by {binding_count} binding(s)")]
    AttributeStillReferenced {
        attribute_id: i64,
        binding_count: i64,
    },

    #[error("value {value_id} is still referenced by {binding_count} binding(s)")]
    ValueStillReferenced { value_id: i64, binding_count: i64 },

    /// The attribute definition breaks a catalog rule
    #[error("invalid attribute definition: {0}")]
    InvalidDefinition(String),

    /// Every violation found while validating a reconciliation; nothing was written
    #[error("{} assignment(s) rejected", .0.len())]
    Rejected(Vec<Violation>),

    /// Internal error (wraps storage errors)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl CatalogError {
    pub(crate) fn attribute_not_found(attribute_id: i64) -> Self {
        CatalogError::AttributeNotFound(vec![attribute_id])
    }
}

/// Result type for domain operations
pub type Result<T> = std::result::Result<T, CatalogError>;
