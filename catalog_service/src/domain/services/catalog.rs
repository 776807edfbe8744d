//! Attribute definition and value operations

use super::{CatalogServiceImpl, internal};
use crate::domain::{
    error::{CatalogError, Result},
    models::{
        AddValueOutcome, AttributeDefinition, AttributePatch, AttributeValue,
        AttributeWithValues, CreateAttributeOutcome, DeleteOutcome, NewAttribute,
        NewAttributeValue, RequestContext, UpdateAttributeOutcome,
    },
    ports::{AttributeCatalogService, CatalogStorage, RelationStore},
    validation::{validate_definition, validate_new_attribute, validate_value_text},
};

impl<C, R> CatalogServiceImpl<C, R>
where
    C: CatalogStorage,
    R: RelationStore,
    anyhow::Error: From<C::Error>,
    anyhow::Error: From<R::Error>,
{
    async fn existing_attribute(&self, attribute_id: i64) -> Result<AttributeDefinition> {
        self.catalog
            .get_attribute(attribute_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| CatalogError::attribute_not_found(attribute_id))
    }
}

impl<C, R> AttributeCatalogService for CatalogServiceImpl<C, R>
where
    C: CatalogStorage,
    R: RelationStore,
    anyhow::Error: From<C::Error>,
    anyhow::Error: From<R::Error>,
{
    #[tracing::instrument(skip(self, ctx, attribute), fields(actor = %ctx, name = %attribute.name))]
    async fn define_attribute(
        &self,
        ctx: RequestContext,
        mut attribute: NewAttribute,
    ) -> Result<AttributeWithValues> {
        attribute.name = attribute.name.trim().to_string();
        for value in &mut attribute.values {
            value.value = value.value.trim().to_string();
        }
        validate_new_attribute(&attribute).map_err(CatalogError::InvalidDefinition)?;

        match self
            .catalog
            .create_attribute(&attribute)
            .await
            .map_err(internal)?
        {
            CreateAttributeOutcome::Created(created) => {
                tracing::info!(
                    attribute_id = created.definition.id,
                    value_count = created.values.len(),
                    "defined attribute"
                );
                Ok(created)
            }
            CreateAttributeOutcome::DuplicateName => {
                tracing::warn!("attribute name already taken");
                Err(CatalogError::DuplicateName(attribute.name))
            }
        }
    }

    #[tracing::instrument(skip(self, ctx, patch), fields(actor = %ctx))]
    async fn update_attribute(
        &self,
        ctx: RequestContext,
        attribute_id: i64,
        mut patch: AttributePatch,
    ) -> Result<AttributeDefinition> {
        let current = self.existing_attribute(attribute_id).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        if let Some(name) = patch.name.as_mut() {
            *name = name.trim().to_string();
        }
        let merged = patch.apply_to(&current);
        validate_definition(&merged).map_err(CatalogError::InvalidDefinition)?;

        if patch.changes_input_kind(&current) {
            let binding_count = self
                .relations
                .count_bindings_for_attribute(attribute_id)
                .await
                .map_err(internal)?;
            if binding_count > 0 {
                tracing::warn!(binding_count, "input kind change on a bound attribute");
                return Err(CatalogError::AttributeStillReferenced {
                    attribute_id,
                    binding_count,
                });
            }

            if !merged.input_kind.is_selectable() {
                let values = self
                    .catalog
                    .list_values(attribute_id)
                    .await
                    .map_err(internal)?;
                if !values.is_empty() {
                    return Err(CatalogError::InvalidDefinition(format!(
                        "{} attributes cannot own values; remove its {} value(s) first",
                        merged.input_kind,
                        values.len()
                    )));
                }
            }
        }

        match self
            .catalog
            .update_attribute(attribute_id, &patch)
            .await
            .map_err(internal)?
        {
            UpdateAttributeOutcome::Updated(updated) => {
                tracing::info!("updated attribute");
                Ok(updated)
            }
            UpdateAttributeOutcome::NotFound => Err(CatalogError::attribute_not_found(attribute_id)),
            UpdateAttributeOutcome::DuplicateName => Err(CatalogError::DuplicateName(merged.name)),
        }
    }

    #[tracing::instrument(skip(self, ctx), fields(actor = %ctx))]
    async fn delete_attribute(&self, ctx: RequestContext, attribute_id: i64) -> Result<()> {
        match self
            .catalog
            .delete_attribute(attribute_id)
            .await
            .map_err(internal)?
        {
            DeleteOutcome::Deleted => {
                tracing::info!("deleted attribute");
                Ok(())
            }
            DeleteOutcome::NotFound => Err(CatalogError::attribute_not_found(attribute_id)),
            DeleteOutcome::StillReferenced { binding_count } => {
                tracing::warn!(binding_count, "refusing to delete a bound attribute");
                Err(CatalogError::AttributeStillReferenced {
                    attribute_id,
                    binding_count,
                })
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn get_attribute(&self, attribute_id: i64) -> Result<AttributeDefinition> {
        self.existing_attribute(attribute_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_attribute_with_values(&self, attribute_id: i64) -> Result<AttributeWithValues> {
        self.catalog
            .get_attributes_with_values(&[attribute_id])
            .await
            .map_err(internal)?
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::attribute_not_found(attribute_id))
    }

    #[tracing::instrument(skip(self))]
    async fn list_attributes(&self) -> Result<Vec<AttributeDefinition>> {
        self.catalog.list_attributes().await.map_err(internal)
    }

    #[tracing::instrument(skip(self))]
    async fn list_values(&self, attribute_id: i64) -> Result<Vec<AttributeValue>> {
        self.existing_attribute(attribute_id).await?;
        self.catalog
            .list_values(attribute_id)
            .await
            .map_err(internal)
    }

    #[tracing::instrument(skip(self, ctx, value), fields(actor = %ctx))]
    async fn add_value(
        &self,
        ctx: RequestContext,
        attribute_id: i64,
        mut value: NewAttributeValue,
    ) -> Result<AttributeValue> {
        value.value = value.value.trim().to_string();
        let attribute = self.existing_attribute(attribute_id).await?;
        if !attribute.input_kind.is_selectable() {
            return Err(CatalogError::InvalidDefinition(format!(
                "{} attributes cannot own values",
                attribute.input_kind
            )));
        }
        validate_value_text(&value.value).map_err(CatalogError::InvalidDefinition)?;

        match self
            .catalog
            .add_value(attribute_id, &value)
            .await
            .map_err(internal)?
        {
            AddValueOutcome::Added(added) => {
                tracing::info!(value_id = added.id, "added attribute value");
                Ok(added)
            }
            AddValueOutcome::DuplicateValue => Err(CatalogError::DuplicateValue {
                attribute_id,
                value: value.value,
            }),
        }
    }

    #[tracing::instrument(skip(self, ctx), fields(actor = %ctx))]
    async fn remove_value(&self, ctx: RequestContext, attribute_id: i64, value_id: i64) -> Result<()> {
        self.existing_attribute(attribute_id).await?;

        match self
            .catalog
            .delete_value(attribute_id, value_id)
            .await
            .map_err(internal)?
        {
            DeleteOutcome::Deleted => {
                tracing::info!("removed attribute value");
                Ok(())
            }
            DeleteOutcome::NotFound => Err(CatalogError::AttributeValueNotFound {
                attribute_id,
                value_id,
            }),
            DeleteOutcome::StillReferenced { binding_count } => {
                tracing::warn!(binding_count, "refusing to remove a bound value");
                Err(CatalogError::ValueStillReferenced {
                    value_id,
                    binding_count,
                })
            }
        }
    }
}
