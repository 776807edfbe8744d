//! Binding delete operations.

use crate::error::CatalogDatabaseError;
use models_catalog::EntityRef;
use sqlx::PgConnection;

/// Deletes the bindings with the given ids, restricted to `entity`.
/// Returns the number of rows removed.
#[tracing::instrument(skip(conn))]
pub async fn delete_bindings(
    conn: &mut PgConnection,
    entity: EntityRef,
    binding_ids: &[i64],
) -> Result<u64, CatalogDatabaseError> {
    if binding_ids.is_empty() {
        return Ok(0);
    }

    let deleted = sqlx::query(
        r#"
        DELETE FROM attribute_bindings
        WHERE id = ANY($1)
          AND entity_kind = $2
          AND entity_id = $3
        "#,
    )
    .bind(binding_ids)
    .bind(entity.kind)
    .bind(entity.id)
    .execute(conn)
    .await?
    .rows_affected();

    Ok(deleted)
}
