//! Attribute value get operations.

use crate::error::CatalogDatabaseError;
use models_catalog::db;
use models_catalog::service::AttributeValue;
use sqlx::{Executor, Postgres};
use std::collections::HashMap;

type Result<T> = std::result::Result<T, CatalogDatabaseError>;

/// Gets the values owned by an attribute, highest sort score first, then by id.
#[tracing::instrument(skip(executor))]
pub async fn get_attribute_values<'e, E>(executor: E, attribute_id: i64) -> Result<Vec<AttributeValue>>
where
    E: Executor<'e, Database = Postgres>,
{
    let rows = sqlx::query_as::<_, db::AttributeValue>(
        r#"
        SELECT id, attribute_id, value, sort_score, created_at, updated_at
        FROM attribute_values
        WHERE attribute_id = $1
        ORDER BY sort_score DESC, id ASC
        "#,
    )
    .bind(attribute_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Gets the values of several attributes in a single query, keyed by attribute id.
/// Each list keeps display order.
#[tracing::instrument(skip(executor))]
pub async fn get_attribute_values_batch<'e, E>(
    executor: E,
    attribute_ids: &[i64],
) -> Result<HashMap<i64, Vec<AttributeValue>>>
where
    E: Executor<'e, Database = Postgres>,
{
    if attribute_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, db::AttributeValue>(
        r#"
        SELECT id, attribute_id, value, sort_score, created_at, updated_at
        FROM attribute_values
        WHERE attribute_id = ANY($1)
        ORDER BY attribute_id, sort_score DESC, id ASC
        "#,
    )
    .bind(attribute_ids)
    .fetch_all(executor)
    .await?;

    let mut result: HashMap<i64, Vec<AttributeValue>> = HashMap::new();
    for row in rows {
        result
            .entry(row.attribute_id)
            .or_default()
            .push(row.into());
    }

    Ok(result)
}
