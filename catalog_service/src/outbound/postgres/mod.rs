//! PostgreSQL implementation of storage ports, delegating to catalog_db_client

use catalog_db_client::{
    attribute_definitions::{
        delete::{DeleteAttributeOutcome, delete_attribute_definition},
        get::{get_attribute_definition, get_attributes_with_values, list_attribute_definitions},
        insert::create_attribute_definition,
        update::update_attribute_definition,
    },
    attribute_values::{
        delete::{DeleteValueOutcome, delete_attribute_value},
        get::get_attribute_values,
        insert::insert_attribute_value,
    },
    bindings::{
        delete::delete_bindings,
        get::{count_bindings_for_attribute, get_bindings_for_entity, get_bindings_for_entity_attributes},
        insert::insert_bindings,
        lock::lock_entity,
    },
    error::CatalogDatabaseError,
};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{
    models::{
        AddValueOutcome, AttributeDefinition, AttributePatch, AttributeValue,
        AttributeWithValues, Binding, BindingKey, CreateAttributeOutcome, DeleteOutcome,
        EntityRef, NewAttribute, NewAttributeValue, UpdateAttributeOutcome,
    },
    ports::{CatalogStorage, EntityTx, RelationStore},
};

/// PostgreSQL storage implementation for the catalog
#[derive(Debug, Clone)]
pub struct CatalogPgStorage {
    pool: PgPool,
}

impl CatalogPgStorage {
    /// Create a new PostgreSQL catalog storage
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogStorage for CatalogPgStorage {
    type Error = CatalogDatabaseError;

    async fn create_attribute(
        &self,
        attribute: &NewAttribute,
    ) -> Result<CreateAttributeOutcome, Self::Error> {
        match create_attribute_definition(&self.pool, attribute).await {
            Ok(created) => Ok(CreateAttributeOutcome::Created(created)),
            Err(CatalogDatabaseError::DuplicateName(_)) => Ok(CreateAttributeOutcome::DuplicateName),
            Err(e) => Err(e),
        }
    }

    async fn get_attribute(
        &self,
        attribute_id: i64,
    ) -> Result<Option<AttributeDefinition>, Self::Error> {
        get_attribute_definition(&self.pool, attribute_id).await
    }

    async fn list_attributes(&self) -> Result<Vec<AttributeDefinition>, Self::Error> {
        list_attribute_definitions(&self.pool).await
    }

    async fn get_attributes_with_values(
        &self,
        attribute_ids: &[i64],
    ) -> Result<Vec<AttributeWithValues>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        get_attributes_with_values(&mut *conn, attribute_ids).await
    }

    async fn update_attribute(
        &self,
        attribute_id: i64,
        patch: &AttributePatch,
    ) -> Result<UpdateAttributeOutcome, Self::Error> {
        match update_attribute_definition(&self.pool, attribute_id, patch).await {
            Ok(Some(updated)) => Ok(UpdateAttributeOutcome::Updated(updated)),
            Ok(None) => Ok(UpdateAttributeOutcome::NotFound),
            Err(CatalogDatabaseError::DuplicateName(_)) => Ok(UpdateAttributeOutcome::DuplicateName),
            Err(e) => Err(e),
        }
    }

    async fn delete_attribute(&self, attribute_id: i64) -> Result<DeleteOutcome, Self::Error> {
        Ok(
            match delete_attribute_definition(&self.pool, attribute_id).await? {
                DeleteAttributeOutcome::Deleted { .. } => DeleteOutcome::Deleted,
                DeleteAttributeOutcome::NotFound => DeleteOutcome::NotFound,
                DeleteAttributeOutcome::StillReferenced { binding_count } => {
                    DeleteOutcome::StillReferenced { binding_count }
                }
            },
        )
    }

    async fn list_values(&self, attribute_id: i64) -> Result<Vec<AttributeValue>, Self::Error> {
        get_attribute_values(&self.pool, attribute_id).await
    }

    async fn add_value(
        &self,
        attribute_id: i64,
        value: &NewAttributeValue,
    ) -> Result<AddValueOutcome, Self::Error> {
        match insert_attribute_value(&self.pool, attribute_id, value).await {
            Ok(added) => Ok(AddValueOutcome::Added(added)),
            Err(CatalogDatabaseError::DuplicateValue { .. }) => Ok(AddValueOutcome::DuplicateValue),
            Err(e) => Err(e),
        }
    }

    async fn delete_value(
        &self,
        attribute_id: i64,
        value_id: i64,
    ) -> Result<DeleteOutcome, Self::Error> {
        Ok(
            match delete_attribute_value(&self.pool, attribute_id, value_id).await? {
                DeleteValueOutcome::Deleted => DeleteOutcome::Deleted,
                DeleteValueOutcome::NotFound => DeleteOutcome::NotFound,
                DeleteValueOutcome::StillReferenced { binding_count } => {
                    DeleteOutcome::StillReferenced { binding_count }
                }
            },
        )
    }
}

impl RelationStore for CatalogPgStorage {
    type Error = CatalogDatabaseError;
    type Tx = PgEntityTx;

    async fn begin_entity_tx(&self, entity: EntityRef) -> Result<PgEntityTx, Self::Error> {
        let mut tx = self.pool.begin().await?;
        lock_entity(&mut *tx, entity).await?;
        Ok(PgEntityTx { tx, entity })
    }

    async fn list_entity_bindings(&self, entity: EntityRef) -> Result<Vec<Binding>, Self::Error> {
        get_bindings_for_entity(&self.pool, entity).await
    }

    async fn count_bindings_for_attribute(&self, attribute_id: i64) -> Result<i64, Self::Error> {
        count_bindings_for_attribute(&self.pool, attribute_id).await
    }
}

/// A Postgres transaction holding the advisory lock of one entity.
/// Rolled back on drop unless committed.
pub struct PgEntityTx {
    tx: Transaction<'static, Postgres>,
    entity: EntityRef,
}

impl EntityTx for PgEntityTx {
    type Error = CatalogDatabaseError;

    async fn find_by_entity_and_attributes(
        &mut self,
        attribute_ids: &[i64],
    ) -> Result<Vec<Binding>, Self::Error> {
        get_bindings_for_entity_attributes(&mut *self.tx, self.entity, attribute_ids).await
    }

    async fn batch_insert(&mut self, keys: &[BindingKey]) -> Result<u64, Self::Error> {
        insert_bindings(&mut *self.tx, self.entity, keys).await
    }

    async fn batch_delete(&mut self, binding_ids: &[i64]) -> Result<u64, Self::Error> {
        delete_bindings(&mut *self.tx, self.entity, binding_ids).await
    }

    async fn commit(self) -> Result<(), Self::Error> {
        self.tx.commit().await?;
        Ok(())
    }
}
