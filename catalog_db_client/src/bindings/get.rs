//! Binding get operations.

use crate::error::CatalogDatabaseError;
use models_catalog::EntityRef;
use models_catalog::db;
use models_catalog::service::Binding;
use sqlx::{Executor, Postgres};

type Result<T> = std::result::Result<T, CatalogDatabaseError>;

fn into_service(rows: Vec<db::Binding>) -> Result<Vec<Binding>> {
    rows.into_iter()
        .map(|row| row.try_into().map_err(CatalogDatabaseError::from))
        .collect()
}

/// Gets the bindings of `entity` whose attribute is one of `attribute_ids`.
#[tracing::instrument(skip(executor))]
pub async fn get_bindings_for_entity_attributes<'e, E>(
    executor: E,
    entity: EntityRef,
    attribute_ids: &[i64],
) -> Result<Vec<Binding>>
where
    E: Executor<'e, Database = Postgres>,
{
    if attribute_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, db::Binding>(
        r#"
        SELECT
            id,
            entity_kind,
            entity_id,
            attribute_id,
            value_id,
            free_text,
            created_at,
            updated_at
        FROM attribute_bindings
        WHERE entity_kind = $1
          AND entity_id = $2
          AND attribute_id = ANY($3)
        ORDER BY attribute_id, id
        "#,
    )
    .bind(entity.kind)
    .bind(entity.id)
    .bind(attribute_ids)
    .fetch_all(executor)
    .await?;

    into_service(rows)
}

/// Gets every binding of `entity`.
#[tracing::instrument(skip(executor))]
pub async fn get_bindings_for_entity<'e, E>(executor: E, entity: EntityRef) -> Result<Vec<Binding>>
where
    E: Executor<'e, Database = Postgres>,
{
    let rows = sqlx::query_as::<_, db::Binding>(
        r#"
        SELECT
            id,
            entity_kind,
            entity_id,
            attribute_id,
            value_id,
            free_text,
            created_at,
            updated_at
        FROM attribute_bindings
        WHERE entity_kind = $1
          AND entity_id = $2
        ORDER BY attribute_id, id
        "#,
    )
    .bind(entity.kind)
    .bind(entity.id)
    .fetch_all(executor)
    .await?;

    into_service(rows)
}

/// Counts the bindings of any entity that reference `attribute_id`.
#[tracing::instrument(skip(executor))]
pub async fn count_bindings_for_attribute<'e, E>(executor: E, attribute_id: i64) -> Result<i64>
where
    E: Executor<'e, Database = Postgres>,
{
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM attribute_bindings WHERE attribute_id = $1")
            .bind(attribute_id)
            .fetch_one(executor)
            .await?;

    Ok(count)
}
