//! Attribute value delete operations.

use crate::error::CatalogDatabaseError;
use sqlx::{Pool, Postgres};

type Result<T> = std::result::Result<T, CatalogDatabaseError>;

/// Result of attempting to delete an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteValueOutcome {
    Deleted,
    /// No value with that id is owned by the attribute
    NotFound,
    /// Bindings still point at the value; nothing was removed
    StillReferenced { binding_count: i64 },
}

/// Deletes a value owned by `attribute_id` unless a binding points at it.
#[tracing::instrument(skip(db))]
pub async fn delete_attribute_value(
    db: &Pool<Postgres>,
    attribute_id: i64,
    value_id: i64,
) -> Result<DeleteValueOutcome> {
    let mut tx = db.begin().await?;

    let locked: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM attribute_values WHERE id = $1 AND attribute_id = $2 FOR UPDATE",
    )
    .bind(value_id)
    .bind(attribute_id)
    .fetch_optional(&mut *tx)
    .await?;

    if locked.is_none() {
        return Ok(DeleteValueOutcome::NotFound);
    }

    let binding_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM attribute_bindings WHERE value_id = $1")
            .bind(value_id)
            .fetch_one(&mut *tx)
            .await?;

    if binding_count > 0 {
        return Ok(DeleteValueOutcome::StillReferenced { binding_count });
    }

    sqlx::query("DELETE FROM attribute_values WHERE id = $1")
        .bind(value_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(DeleteValueOutcome::Deleted)
}
