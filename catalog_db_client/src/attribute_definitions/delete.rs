//! Attribute definition delete operations.

use crate::error::CatalogDatabaseError;
use sqlx::{Pool, Postgres};

type Result<T> = std::result::Result<T, CatalogDatabaseError>;

/// Result of attempting to delete an attribute definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAttributeOutcome {
    /// The definition and its values were removed
    Deleted { value_count: u64 },
    /// No definition has that id
    NotFound,
    /// Bindings still reference the definition; nothing was removed
    StillReferenced { binding_count: i64 },
}

/// Deletes an attribute definition and the values it owns, unless any binding references it.
///
/// The definition row is locked for the duration of the check so that a binding
/// cannot be attached between the count and the delete.
#[tracing::instrument(skip(db))]
pub async fn delete_attribute_definition(
    db: &Pool<Postgres>,
    attribute_id: i64,
) -> Result<DeleteAttributeOutcome> {
    let mut tx = db.begin().await?;

    let locked: Option<i64> =
        sqlx::query_scalar("SELECT id FROM attribute_definitions WHERE id = $1 FOR UPDATE")
            .bind(attribute_id)
            .fetch_optional(&mut *tx)
            .await?;

    if locked.is_none() {
        return Ok(DeleteAttributeOutcome::NotFound);
    }

    let binding_count =
        crate::bindings::get::count_bindings_for_attribute(&mut *tx, attribute_id).await?;
    if binding_count > 0 {
        tracing::warn!(
            attribute_id,
            binding_count,
            "refusing to delete referenced attribute definition"
        );
        return Ok(DeleteAttributeOutcome::StillReferenced { binding_count });
    }

    let value_count = sqlx::query("DELETE FROM attribute_values WHERE attribute_id = $1")
        .bind(attribute_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM attribute_definitions WHERE id = $1")
        .bind(attribute_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(attribute_id, value_count, "deleted attribute definition");

    Ok(DeleteAttributeOutcome::Deleted { value_count })
}

#[cfg(all(test, feature = "db_tests"))]
mod tests {
    use super::*;
    use catalog_db_migrator::CATALOG_DB_MIGRATIONS;
    use models_catalog::EntityRef;

    #[sqlx::test(
        migrator = "CATALOG_DB_MIGRATIONS",
        fixtures(path = "../../fixtures", scripts("catalog"))
    )]
    async fn test_delete_referenced_attribute_is_refused(
        pool: Pool<Postgres>,
    ) -> anyhow::Result<()> {
        let outcome = delete_attribute_definition(&pool, 2).await?;
        assert_eq!(
            outcome,
            DeleteAttributeOutcome::StillReferenced { binding_count: 2 }
        );

        let still_there = crate::attribute_definitions::get::get_attribute_definition(&pool, 2)
            .await?
            .is_some();
        assert!(still_there);
        Ok(())
    }

    #[sqlx::test(
        migrator = "CATALOG_DB_MIGRATIONS",
        fixtures(path = "../../fixtures", scripts("catalog"))
    )]
    async fn test_delete_succeeds_once_bindings_are_gone(
        pool: Pool<Postgres>,
    ) -> anyhow::Result<()> {
        let mut conn = pool.acquire().await?;
        crate::bindings::delete::delete_bindings(&mut conn, EntityRef::sku(100), &[2, 3]).await?;
        drop(conn);

        let outcome = delete_attribute_definition(&pool, 2).await?;
        assert_eq!(outcome, DeleteAttributeOutcome::Deleted { value_count: 3 });

        let values = crate::attribute_values::get::get_attribute_values(&pool, 2).await?;
        assert!(values.is_empty());
        Ok(())
    }

    #[sqlx::test(migrator = "CATALOG_DB_MIGRATIONS")]
    async fn test_delete_unknown_attribute(pool: Pool<Postgres>) -> anyhow::Result<()> {
        assert_eq!(
            delete_attribute_definition(&pool, 1).await?,
            DeleteAttributeOutcome::NotFound
        );
        Ok(())
    }
}
