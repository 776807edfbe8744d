//! Storage ports - the persistence the domain depends on

use crate::domain::models::{
    AddValueOutcome, AttributeDefinition, AttributePatch, AttributeValue, AttributeWithValues,
    Binding, BindingKey, CreateAttributeOutcome, DeleteOutcome, EntityRef, NewAttribute,
    NewAttributeValue, UpdateAttributeOutcome,
};

/// Storage port for attribute definitions and their values
pub trait CatalogStorage: Send + Sync + 'static {
    /// Error type for storage operations
    type Error: Send + Sync + std::error::Error + 'static;

    /// Persists the definition and its initial values atomically
    fn create_attribute(
        &self,
        attribute: &NewAttribute,
    ) -> impl std::future::Future<Output = Result<CreateAttributeOutcome, Self::Error>> + Send;

    fn get_attribute(
        &self,
        attribute_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<AttributeDefinition>, Self::Error>> + Send;

    fn list_attributes(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<AttributeDefinition>, Self::Error>> + Send;

    /// Batch load; ids with no definition are absent from the result
    fn get_attributes_with_values(
        &self,
        attribute_ids: &[i64],
    ) -> impl std::future::Future<Output = Result<Vec<AttributeWithValues>, Self::Error>> + Send;

    fn update_attribute(
        &self,
        attribute_id: i64,
        patch: &AttributePatch,
    ) -> impl std::future::Future<Output = Result<UpdateAttributeOutcome, Self::Error>> + Send;

    /// Deletes the owned values then the definition, unless bindings reference it
    fn delete_attribute(
        &self,
        attribute_id: i64,
    ) -> impl std::future::Future<Output = Result<DeleteOutcome, Self::Error>> + Send;

    /// Values in display order
    fn list_values(
        &self,
        attribute_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<AttributeValue>, Self::Error>> + Send;

    fn add_value(
        &self,
        attribute_id: i64,
        value: &NewAttributeValue,
    ) -> impl std::future::Future<Output = Result<AddValueOutcome, Self::Error>> + Send;

    fn delete_value(
        &self,
        attribute_id: i64,
        value_id: i64,
    ) -> impl std::future::Future<Output = Result<DeleteOutcome, Self::Error>> + Send;
}

/// Storage port for bindings
pub trait RelationStore: Send + Sync + 'static {
    type Error: Send + Sync + std::error::Error + 'static;
    type Tx: EntityTx<Error = Self::Error>;

    /// Opens a transaction that holds the entity's lock until it is committed or dropped
    fn begin_entity_tx(
        &self,
        entity: EntityRef,
    ) -> impl std::future::Future<Output = Result<Self::Tx, Self::Error>> + Send;

    fn list_entity_bindings(
        &self,
        entity: EntityRef,
    ) -> impl std::future::Future<Output = Result<Vec<Binding>, Self::Error>> + Send;

    fn count_bindings_for_attribute(
        &self,
        attribute_id: i64,
    ) -> impl std::future::Future<Output = Result<i64, Self::Error>> + Send;
}

/// A transaction scoped to one entity. Dropping it without [EntityTx::commit] discards
/// every write made through it.
pub trait EntityTx: Send + 'static {
    type Error: Send + Sync + std::error::Error + 'static;

    fn find_by_entity_and_attributes(
        &mut self,
        attribute_ids: &[i64],
    ) -> impl std::future::Future<Output = Result<Vec<Binding>, Self::Error>> + Send;

    fn batch_insert(
        &mut self,
        keys: &[BindingKey],
    ) -> impl std::future::Future<Output = Result<u64, Self::Error>> + Send;

    fn batch_delete(
        &mut self,
        binding_ids: &[i64],
    ) -> impl std::future::Future<Output = Result<u64, Self::Error>> + Send;

    fn commit(self) -> impl std::future::Future<Output = Result<(), Self::Error>> + Send;
}
