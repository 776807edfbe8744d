//! Service ports - the interfaces callers drive the catalog through

use crate::domain::{
    error::Result,
    models::{
        AttributeDefinition, AttributePatch, AttributeValue, AttributeWithValues, Binding,
        DesiredAssignment, EntityRef, NewAttribute, NewAttributeValue, ReconcileOutcome,
        RequestContext,
    },
};

/// Admin surface over attribute definitions and their enumerated values
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait AttributeCatalogService: Send + Sync + 'static {
    fn define_attribute(
        &self,
        ctx: RequestContext,
        attribute: NewAttribute,
    ) -> impl std::future::Future<Output = Result<AttributeWithValues>> + Send;

    fn update_attribute(
        &self,
        ctx: RequestContext,
        attribute_id: i64,
        patch: AttributePatch,
    ) -> impl std::future::Future<Output = Result<AttributeDefinition>> + Send;

    fn delete_attribute(
        &self,
        ctx: RequestContext,
        attribute_id: i64,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn get_attribute(
        &self,
        attribute_id: i64,
    ) -> impl std::future::Future<Output = Result<AttributeDefinition>> + Send;

    fn get_attribute_with_values(
        &self,
        attribute_id: i64,
    ) -> impl std::future::Future<Output = Result<AttributeWithValues>> + Send;

    /// All definitions, highest sort score first
    fn list_attributes(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<AttributeDefinition>>> + Send;

    fn list_values(
        &self,
        attribute_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<AttributeValue>>> + Send;

    fn add_value(
        &self,
        ctx: RequestContext,
        attribute_id: i64,
        value: NewAttributeValue,
    ) -> impl std::future::Future<Output = Result<AttributeValue>> + Send;

    fn remove_value(
        &self,
        ctx: RequestContext,
        attribute_id: i64,
        value_id: i64,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Entity-facing surface: replace and read the attribute bindings of a product or SKU
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait BindingService: Send + Sync + 'static {
    /// Makes the stored bindings of `entity`, for every attribute named in `desired`,
    /// equal to `desired`. Attributes not named are left alone.
    fn reconcile(
        &self,
        ctx: RequestContext,
        entity: EntityRef,
        desired: Vec<DesiredAssignment>,
    ) -> impl std::future::Future<Output = Result<ReconcileOutcome>> + Send;

    fn list_entity_bindings(
        &self,
        entity: EntityRef,
    ) -> impl std::future::Future<Output = Result<Vec<Binding>>> + Send;
}
