//! Database errors for catalog operations

use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum CatalogDatabaseError {
    #[error("An attribute named {0:?} already exists")]
    DuplicateName(String),

    #[error("Attribute {attribute_id} already has a value {value:?}")]
    DuplicateValue { attribute_id: i64, value: String },

    #[error("Database conversion error: {0}")]
    Conversion(#[from] models_catalog::db::DbConversionError),

    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),
}

/// The name of the unique constraint `err` violated, if it is a unique violation.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    if let sqlx::Error::Database(db_err) = err
        && db_err.is_unique_violation()
    {
        return Some(db_err.constraint().unwrap_or_default());
    }
    None
}
