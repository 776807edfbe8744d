//! Attribute value insert operations.

use crate::error::{CatalogDatabaseError, unique_violation};
use models_catalog::db;
use models_catalog::service::{AttributeValue, NewAttributeValue};
use sqlx::{Executor, Postgres};

type Result<T> = std::result::Result<T, CatalogDatabaseError>;

/// Inserts a value owned by `attribute_id`.
#[tracing::instrument(skip(executor))]
pub async fn insert_attribute_value<'e, E>(
    executor: E,
    attribute_id: i64,
    value: &NewAttributeValue,
) -> Result<AttributeValue>
where
    E: Executor<'e, Database = Postgres>,
{
    let row = sqlx::query_as::<_, db::AttributeValue>(
        r#"
        INSERT INTO attribute_values (attribute_id, value, sort_score)
        VALUES ($1, $2, $3)
        RETURNING id, attribute_id, value, sort_score, created_at, updated_at
        "#,
    )
    .bind(attribute_id)
    .bind(&value.value)
    .bind(value.sort_score)
    .fetch_one(executor)
    .await
    .map_err(|e| match unique_violation(&e) {
        Some("attribute_values_attribute_value_key") => CatalogDatabaseError::DuplicateValue {
            attribute_id,
            value: value.value.clone(),
        },
        _ => CatalogDatabaseError::Query(e),
    })?;

    Ok(row.into())
}

#[cfg(all(test, feature = "db_tests"))]
mod tests {
    use super::*;
    use catalog_db_migrator::CATALOG_DB_MIGRATIONS;
    use cool_asserts::assert_matches;
    use sqlx::Pool;

    #[sqlx::test(
        migrator = "CATALOG_DB_MIGRATIONS",
        fixtures(path = "../../fixtures", scripts("catalog"))
    )]
    async fn test_insert_attribute_value(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let inserted =
            insert_attribute_value(&pool, 2, &NewAttributeValue::new("black", 9)).await?;

        assert_eq!(inserted.attribute_id, 2);
        assert_eq!(inserted.value, "black");

        let first = crate::attribute_values::get::get_attribute_values(&pool, 2)
            .await?
            .remove(0);
        assert_eq!(first.id, inserted.id);
        Ok(())
    }

    #[sqlx::test(
        migrator = "CATALOG_DB_MIGRATIONS",
        fixtures(path = "../../fixtures", scripts("catalog"))
    )]
    async fn test_insert_duplicate_value(pool: Pool<Postgres>) -> anyhow::Result<()> {
        let result = insert_attribute_value(&pool, 2, &NewAttributeValue::new("red", 0)).await;
        assert_matches!(
            result,
            Err(CatalogDatabaseError::DuplicateValue { attribute_id: 2, .. })
        );
        Ok(())
    }
}
