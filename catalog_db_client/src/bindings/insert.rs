//! Binding insert operations.

use crate::error::CatalogDatabaseError;
use models_catalog::EntityRef;
use models_catalog::service::BindingKey;
use sqlx::PgConnection;

/// Inserts one binding of `entity` per key in a single statement.
/// Returns the number of rows written.
#[tracing::instrument(skip(conn, keys), fields(count = keys.len()))]
pub async fn insert_bindings(
    conn: &mut PgConnection,
    entity: EntityRef,
    keys: &[BindingKey],
) -> Result<u64, CatalogDatabaseError> {
    if keys.is_empty() {
        return Ok(0);
    }

    let mut attribute_ids = Vec::with_capacity(keys.len());
    let mut value_ids: Vec<Option<i64>> = Vec::with_capacity(keys.len());
    let mut free_texts: Vec<Option<String>> = Vec::with_capacity(keys.len());
    for key in keys {
        let (value_id, free_text) = key.target.to_db_values();
        attribute_ids.push(key.attribute_id);
        value_ids.push(value_id);
        free_texts.push(free_text);
    }

    let inserted = sqlx::query(
        r#"
        INSERT INTO attribute_bindings (entity_kind, entity_id, attribute_id, value_id, free_text)
        SELECT $1::catalog_entity_kind, $2, t.attribute_id, t.value_id, t.free_text
        FROM UNNEST($3::bigint[], $4::bigint[], $5::text[]) AS t(attribute_id, value_id, free_text)
        "#,
    )
    .bind(entity.kind)
    .bind(entity.id)
    .bind(&attribute_ids)
    .bind(&value_ids)
    .bind(&free_texts)
    .execute(conn)
    .await
    .map_err(|e| {
        tracing::error!(error = ?e, entity = %entity, "failed to insert bindings");
        CatalogDatabaseError::Query(e)
    })?
    .rows_affected();

    Ok(inserted)
}
