//! In-memory implementation of the storage ports, for tests of the domain and of
//! downstream crates. Mirrors the constraints the Postgres schema enforces.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use models_catalog::service::attribute_value::sort_for_display;
use thiserror::Error;
use tokio::sync::OwnedMutexGuard;

use crate::domain::{
    models::{
        AddValueOutcome, AttributeDefinition, AttributePatch, AttributeValue,
        AttributeWithValues, Binding, BindingKey, BindingTarget, CreateAttributeOutcome,
        DeleteOutcome, EntityRef, NewAttribute, NewAttributeValue, UpdateAttributeOutcome,
    },
    ports::{CatalogStorage, EntityTx, RelationStore},
};

const _NOT_PROD: () = const {
    assert!(
        cfg!(debug_assertions),
        "You are trying to include in-memory storage in a production build; check which crate enables catalog_service/mock"
    );
};

/// Error type for in-memory storage operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MemoryStorageError {
    #[error("injected storage failure")]
    Injected,
    #[error("attribute {0} does not exist")]
    MissingAttribute(i64),
    #[error("value {value_id} is not owned by attribute {attribute_id}")]
    ForeignValue { attribute_id: i64, value_id: i64 },
}

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    attributes: BTreeMap<i64, AttributeDefinition>,
    values: BTreeMap<i64, AttributeValue>,
    bindings: BTreeMap<i64, Binding>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn values_of(&self, attribute_id: i64) -> Vec<AttributeValue> {
        let mut values: Vec<AttributeValue> = self
            .values
            .values()
            .filter(|v| v.attribute_id == attribute_id)
            .cloned()
            .collect();
        sort_for_display(&mut values);
        values
    }

    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.attributes
            .values()
            .any(|a| a.name == name && Some(a.id) != except)
    }

    fn bindings_where(&self, predicate: impl Fn(&Binding) -> bool) -> i64 {
        self.bindings.values().filter(|&b| predicate(b)).count() as i64
    }

    fn check_binding(&self, key: &BindingKey) -> Result<(), MemoryStorageError> {
        if !self.attributes.contains_key(&key.attribute_id) {
            return Err(MemoryStorageError::MissingAttribute(key.attribute_id));
        }
        if let BindingTarget::Value(value_id) = key.target
            && !self
                .values
                .get(&value_id)
                .is_some_and(|v| v.attribute_id == key.attribute_id)
        {
            return Err(MemoryStorageError::ForeignValue {
                attribute_id: key.attribute_id,
                value_id,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Shared {
    tables: Mutex<Tables>,
    entity_locks: Mutex<HashMap<EntityRef, Arc<tokio::sync::Mutex<()>>>>,
    fail_binding_writes: AtomicBool,
}

/// Catalog and relation storage held in process memory.
///
/// Clones share state. Each entity transaction holds a per-entity lock and stages its
/// writes, applying them all at once on commit.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogStorage {
    shared: Arc<Shared>,
}

impl InMemoryCatalogStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every binding insert fails with [MemoryStorageError::Injected].
    pub fn fail_binding_writes(&self, fail: bool) {
        self.shared
            .fail_binding_writes
            .store(fail, Ordering::SeqCst);
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.shared
            .tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn entity_lock(&self, entity: EntityRef) -> Arc<tokio::sync::Mutex<()>> {
        self.shared
            .entity_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(entity)
            .or_default()
            .clone()
    }
}

impl CatalogStorage for InMemoryCatalogStorage {
    type Error = MemoryStorageError;

    async fn create_attribute(
        &self,
        attribute: &NewAttribute,
    ) -> Result<CreateAttributeOutcome, Self::Error> {
        let mut tables = self.tables();
        if tables.name_taken(&attribute.name, None) {
            return Ok(CreateAttributeOutcome::DuplicateName);
        }

        let now = Utc::now();
        let definition = AttributeDefinition {
            id: tables.next_id(),
            name: attribute.name.clone(),
            sort_score: attribute.sort_score,
            visible: attribute.visible,
            attribute_kind: attribute.attribute_kind,
            input_kind: attribute.input_kind,
            required: attribute.required,
            searchable: attribute.searchable,
            created_at: now,
            updated_at: now,
        };
        tables.attributes.insert(definition.id, definition.clone());

        for value in &attribute.values {
            let id = tables.next_id();
            tables.values.insert(
                id,
                AttributeValue {
                    id,
                    attribute_id: definition.id,
                    value: value.value.clone(),
                    sort_score: value.sort_score,
                    created_at: now,
                    updated_at: now,
                },
            );
        }

        let values = tables.values_of(definition.id);
        Ok(CreateAttributeOutcome::Created(AttributeWithValues {
            definition,
            values,
        }))
    }

    async fn get_attribute(
        &self,
        attribute_id: i64,
    ) -> Result<Option<AttributeDefinition>, Self::Error> {
        Ok(self.tables().attributes.get(&attribute_id).cloned())
    }

    async fn list_attributes(&self) -> Result<Vec<AttributeDefinition>, Self::Error> {
        let mut attributes: Vec<AttributeDefinition> =
            self.tables().attributes.values().cloned().collect();
        attributes.sort_by(|a, b| b.sort_score.cmp(&a.sort_score).then(a.id.cmp(&b.id)));
        Ok(attributes)
    }

    async fn get_attributes_with_values(
        &self,
        attribute_ids: &[i64],
    ) -> Result<Vec<AttributeWithValues>, Self::Error> {
        let tables = self.tables();
        Ok(attribute_ids
            .iter()
            .filter_map(|id| tables.attributes.get(id))
            .map(|definition| AttributeWithValues {
                definition: definition.clone(),
                values: tables.values_of(definition.id),
            })
            .collect())
    }

    async fn update_attribute(
        &self,
        attribute_id: i64,
        patch: &AttributePatch,
    ) -> Result<UpdateAttributeOutcome, Self::Error> {
        let mut tables = self.tables();
        let Some(current) = tables.attributes.get(&attribute_id) else {
            return Ok(UpdateAttributeOutcome::NotFound);
        };

        let mut updated = patch.apply_to(current);
        if tables.name_taken(&updated.name, Some(attribute_id)) {
            return Ok(UpdateAttributeOutcome::DuplicateName);
        }

        updated.updated_at = Utc::now();
        tables.attributes.insert(attribute_id, updated.clone());
        Ok(UpdateAttributeOutcome::Updated(updated))
    }

    async fn delete_attribute(&self, attribute_id: i64) -> Result<DeleteOutcome, Self::Error> {
        let mut tables = self.tables();
        if !tables.attributes.contains_key(&attribute_id) {
            return Ok(DeleteOutcome::NotFound);
        }

        let binding_count = tables.bindings_where(|b| b.attribute_id == attribute_id);
        if binding_count > 0 {
            return Ok(DeleteOutcome::StillReferenced { binding_count });
        }

        tables.values.retain(|_, v| v.attribute_id != attribute_id);
        tables.attributes.remove(&attribute_id);
        Ok(DeleteOutcome::Deleted)
    }

    async fn list_values(&self, attribute_id: i64) -> Result<Vec<AttributeValue>, Self::Error> {
        Ok(self.tables().values_of(attribute_id))
    }

    async fn add_value(
        &self,
        attribute_id: i64,
        value: &NewAttributeValue,
    ) -> Result<AddValueOutcome, Self::Error> {
        let mut tables = self.tables();
        if !tables.attributes.contains_key(&attribute_id) {
            return Err(MemoryStorageError::MissingAttribute(attribute_id));
        }
        if tables
            .values
            .values()
            .any(|v| v.attribute_id == attribute_id && v.value == value.value)
        {
            return Ok(AddValueOutcome::DuplicateValue);
        }

        let now = Utc::now();
        let added = AttributeValue {
            id: tables.next_id(),
            attribute_id,
            value: value.value.clone(),
            sort_score: value.sort_score,
            created_at: now,
            updated_at: now,
        };
        tables.values.insert(added.id, added.clone());
        Ok(AddValueOutcome::Added(added))
    }

    async fn delete_value(
        &self,
        attribute_id: i64,
        value_id: i64,
    ) -> Result<DeleteOutcome, Self::Error> {
        let mut tables = self.tables();
        if !tables
            .values
            .get(&value_id)
            .is_some_and(|v| v.attribute_id == attribute_id)
        {
            return Ok(DeleteOutcome::NotFound);
        }

        let binding_count =
            tables.bindings_where(|b| b.target == BindingTarget::Value(value_id));
        if binding_count > 0 {
            return Ok(DeleteOutcome::StillReferenced { binding_count });
        }

        tables.values.remove(&value_id);
        Ok(DeleteOutcome::Deleted)
    }
}

impl RelationStore for InMemoryCatalogStorage {
    type Error = MemoryStorageError;
    type Tx = MemoryEntityTx;

    async fn begin_entity_tx(&self, entity: EntityRef) -> Result<MemoryEntityTx, Self::Error> {
        let guard = self.entity_lock(entity).lock_owned().await;
        Ok(MemoryEntityTx {
            storage: self.clone(),
            entity,
            _guard: guard,
            inserts: Vec::new(),
            deletes: Vec::new(),
        })
    }

    async fn list_entity_bindings(&self, entity: EntityRef) -> Result<Vec<Binding>, Self::Error> {
        let mut bindings: Vec<Binding> = self
            .tables()
            .bindings
            .values()
            .filter(|b| b.entity == entity)
            .cloned()
            .collect();
        bindings.sort_by_key(|b| (b.attribute_id, b.id));
        Ok(bindings)
    }

    async fn count_bindings_for_attribute(&self, attribute_id: i64) -> Result<i64, Self::Error> {
        Ok(self
            .tables()
            .bindings_where(|b| b.attribute_id == attribute_id))
    }
}

/// Staged writes against one entity. Nothing is visible to other readers until commit.
#[derive(Debug)]
pub struct MemoryEntityTx {
    storage: InMemoryCatalogStorage,
    entity: EntityRef,
    _guard: OwnedMutexGuard<()>,
    inserts: Vec<BindingKey>,
    deletes: Vec<i64>,
}

impl EntityTx for MemoryEntityTx {
    type Error = MemoryStorageError;

    async fn find_by_entity_and_attributes(
        &mut self,
        attribute_ids: &[i64],
    ) -> Result<Vec<Binding>, Self::Error> {
        let mut bindings: Vec<Binding> = self
            .storage
            .tables()
            .bindings
            .values()
            .filter(|b| b.entity == self.entity && attribute_ids.contains(&b.attribute_id))
            .cloned()
            .collect();
        bindings.sort_by_key(|b| (b.attribute_id, b.id));
        // let other tasks run between the read and the commit, like a database round trip
        tokio::task::yield_now().await;
        Ok(bindings)
    }

    async fn batch_insert(&mut self, keys: &[BindingKey]) -> Result<u64, Self::Error> {
        if self
            .storage
            .shared
            .fail_binding_writes
            .load(Ordering::SeqCst)
        {
            return Err(MemoryStorageError::Injected);
        }
        self.inserts.extend_from_slice(keys);
        Ok(keys.len() as u64)
    }

    async fn batch_delete(&mut self, binding_ids: &[i64]) -> Result<u64, Self::Error> {
        self.deletes.extend_from_slice(binding_ids);
        Ok(binding_ids.len() as u64)
    }

    async fn commit(self) -> Result<(), Self::Error> {
        tokio::task::yield_now().await;
        let mut tables = self.storage.tables();
        for key in &self.inserts {
            tables.check_binding(key)?;
        }

        for id in &self.deletes {
            tables.bindings.remove(id);
        }
        let now = Utc::now();
        for key in self.inserts.iter().cloned() {
            let id = tables.next_id();
            tables.bindings.insert(
                id,
                Binding {
                    id,
                    entity: self.entity,
                    attribute_id: key.attribute_id,
                    target: key.target,
                    created_at: now,
                    updated_at: now,
                },
            );
        }
        Ok(())
    }
}
