//! Attribute definition get operations.

use crate::error::CatalogDatabaseError;
use models_catalog::db;
use models_catalog::service::{AttributeDefinition, AttributeWithValues};
use sqlx::{Executor, PgConnection, Postgres};

type Result<T> = std::result::Result<T, CatalogDatabaseError>;

/// Gets a single attribute definition by ID.
#[tracing::instrument(skip(executor))]
pub async fn get_attribute_definition<'e, E>(
    executor: E,
    attribute_id: i64,
) -> Result<Option<AttributeDefinition>>
where
    E: Executor<'e, Database = Postgres>,
{
    let row = sqlx::query_as::<_, db::AttributeDefinition>(
        r#"
        SELECT
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
        FROM attribute_definitions
        WHERE id = $1
        "#,
    )
    .bind(attribute_id)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(Into::into))
}

/// Lists every attribute definition, highest sort score first, then in creation order.
#[tracing::instrument(skip(executor))]
pub async fn list_attribute_definitions<'e, E>(executor: E) -> Result<Vec<AttributeDefinition>>
where
    E: Executor<'e, Database = Postgres>,
{
    let rows = sqlx::query_as::<_, db::AttributeDefinition>(
        r#"
        SELECT
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
        FROM attribute_definitions
        ORDER BY sort_score DESC, id ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Gets the definitions named by `attribute_ids` together with their values.
/// Ids that do not exist are absent from the result.
#[tracing::instrument(skip(conn))]
pub async fn get_attributes_with_values(
    conn: &mut PgConnection,
    attribute_ids: &[i64],
) -> Result<Vec<AttributeWithValues>> {
    if attribute_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, db::AttributeDefinition>(
        r#"
        SELECT
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
        FROM attribute_definitions
        WHERE id = ANY($1)
        ORDER BY sort_score DESC, id ASC
        "#,
    )
    .bind(attribute_ids)
    .fetch_all(&mut *conn)
    .await?;

    let found: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let mut values_by_attribute =
        crate::attribute_values::get::get_attribute_values_batch(&mut *conn, &found).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let values = values_by_attribute.remove(&row.id).unwrap_or_default();
            AttributeWithValues {
                definition: row.into(),
                values,
            }
        })
        .collect())
}

#[cfg(all(test, feature = "db_tests"))]
mod tests {
    use super::*;
    use catalog_db_migrator::CATALOG_DB_MIGRATIONS;
    use models_catalog::{AttributeKind, InputKind};
    use sqlx::{Pool, Postgres};

    #[sqlx::test(
        migrator = "CATALOG_DB_MIGRATIONS",
        fixtures(path = "../../fixtures", scripts("catalog"))
    )]
    async fn test_get_attribute_definition(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let size = get_attribute_definition(&pool, 1).await?.unwrap();

        assert_eq!(size.name, "Size");
        assert_eq!(size.attribute_kind, AttributeKind::Sku);
        assert_eq!(size.input_kind, InputKind::SingleSelect);
        assert!(size.required);

        assert!(get_attribute_definition(&pool, 999).await?.is_none());
        Ok(())
    }

    #[sqlx::test(
        migrator = "CATALOG_DB_MIGRATIONS",
        fixtures(path = "../../fixtures", scripts("catalog"))
    )]
    async fn test_list_orders_by_score_then_creation(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let ids: Vec<i64> = list_attribute_definitions(&pool)
            .await?
            .into_iter()
            .map(|d| d.id)
            .collect();

        assert_eq!(ids, vec![1, 2, 3, 4]);
        Ok(())
    }

    #[sqlx::test(
        migrator = "CATALOG_DB_MIGRATIONS",
        fixtures(path = "../../fixtures", scripts("catalog"))
    )]
    async fn test_get_attributes_with_values(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let mut conn = pool.acquire().await?;
        let attributes = get_attributes_with_values(&mut conn, &[1, 3, 999]).await?;

        assert_eq!(attributes.len(), 2);
        let size = attributes.iter().find(|a| a.definition.id == 1).unwrap();
        let values: Vec<&str> = size.values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(values, vec!["S", "M", "L"]);

        let material = attributes.iter().find(|a| a.definition.id == 3).unwrap();
        assert!(material.values.is_empty());
        Ok(())
    }
}
