//! Attribute definition update operations.

use crate::error::{CatalogDatabaseError, unique_violation};
use models_catalog::db;
use models_catalog::service::{AttributeDefinition, AttributePatch};
use sqlx::{Executor, Postgres};

type Result<T> = std::result::Result<T, CatalogDatabaseError>;

/// Applies the present fields of `patch` to the definition.
/// Returns None if the definition does not exist.
#[tracing::instrument(skip(executor))]
pub async fn update_attribute_definition<'e, E>(
    executor: E,
    attribute_id: i64,
    patch: &AttributePatch,
) -> Result<Option<AttributeDefinition>>
where
    E: Executor<'e, Database = Postgres>,
{
    let row = sqlx::query_as::<_, db::AttributeDefinition>(
        r#"
        UPDATE attribute_definitions
        SET
            name = COALESCE($2, name),
            sort_score = COALESCE($3, sort_score),
            visible = COALESCE($4, visible),
            attribute_kind = COALESCE($5, attribute_kind),
            input_kind = COALESCE($6, input_kind),
            required = COALESCE($7, required),
            searchable = COALESCE($8, searchable),
            updated_at = NOW()
        WHERE id = $1
        RETURNING
            id,
            name,
            sort_score,
            visible,
            attribute_kind,
            input_kind,
            required,
            searchable,
            created_at,
            updated_at
        "#,
    )
    .bind(attribute_id)
    .bind(patch.name.as_deref())
    .bind(patch.sort_score)
    .bind(patch.visible)
    .bind(patch.attribute_kind)
    .bind(patch.input_kind)
    .bind(patch.required)
    .bind(patch.searchable)
    .fetch_optional(executor)
    .await
    .map_err(|e| match (unique_violation(&e), &patch.name) {
        (Some("attribute_definitions_name_key"), Some(name)) => {
            CatalogDatabaseError::DuplicateName(name.clone())
        }
        _ => CatalogDatabaseError::Query(e),
    })?;

    Ok(row.map(Into::into))
}
