//! Per-entity serialization of binding writes.

use crate::error::CatalogDatabaseError;
use models_catalog::EntityRef;
use sqlx::PgConnection;

/// Takes a transaction-scoped advisory lock keyed by the entity.
///
/// Must be called inside a transaction; the lock is released on commit or rollback.
/// Two reconciliations of the same entity therefore run one after the other.
#[tracing::instrument(skip(conn))]
pub async fn lock_entity(
    conn: &mut PgConnection,
    entity: EntityRef,
) -> Result<(), CatalogDatabaseError> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
        .bind(entity.lock_key())
        .execute(conn)
        .await?;

    Ok(())
}
