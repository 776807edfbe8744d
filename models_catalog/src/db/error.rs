//! Database layer conversion errors

use thiserror::Error;

/// Errors that can occur during database model conversions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DbConversionError {
    #[error(
        "Invalid database state: attribute_binding {id} has both value_id and free_text set. Expected exactly one to be set."
    )]
    BindingBothTargetsSet { id: i64 },

    #[error(
        "Invalid database state: attribute_binding {id} has neither value_id nor free_text set. Expected exactly one to be set."
    )]
    BindingNoTargetSet { id: i64 },
}
