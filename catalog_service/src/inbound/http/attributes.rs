//! Attribute definition and value handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use models_catalog::api::{
    AttributeResponse, AttributeValueRequest, AttributeValueResponse,
    AttributeWithValuesResponse, CreateAttributeRequest, UpdateAttributeRequest,
};

use super::{Actor, CatalogHandlerErr, CatalogRouterState};
use crate::domain::ports::{AttributeCatalogService, BindingService};

/// Define an attribute with its initial values
#[utoipa::path(
    post,
    tag = "catalog service",
    path = "/attributes",
    request_body = CreateAttributeRequest,
    params(("x-actor-id" = String, Header, description = "Id of the caller")),
    responses(
        (status = 201, body = AttributeWithValuesResponse),
        (status = 400, body = ErrorResponse),
        (status = 409, body = ErrorResponse),
        (status = 500, body = ErrorResponse),
    )
)]
pub async fn create_attribute<A, B>(
    State(state): State<CatalogRouterState<A, B>>,
    Actor(ctx): Actor,
    Json(request): Json<CreateAttributeRequest>,
) -> Result<(StatusCode, Json<AttributeWithValuesResponse>), CatalogHandlerErr>
where
    A: AttributeCatalogService,
    B: BindingService,
{
    let created = state
        .catalog
        .define_attribute(ctx, request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List every attribute definition, highest sort score first
#[utoipa::path(
    get,
    tag = "catalog service",
    path = "/attributes",
    responses(
        (status = 200, body = Vec<AttributeResponse>),
        (status = 500, body = ErrorResponse),
    )
)]
pub async fn list_attributes<A, B>(
    State(state): State<CatalogRouterState<A, B>>,
) -> Result<Json<Vec<AttributeResponse>>, CatalogHandlerErr>
where
    A: AttributeCatalogService,
    B: BindingService,
{
    let attributes = state.catalog.list_attributes().await?;
    Ok(Json(attributes.into_iter().map(Into::into).collect()))
}

/// Get an attribute definition with its values
#[utoipa::path(
    get,
    tag = "catalog service",
    path = "/attributes/{id}",
    params(("id" = i64, Path, description = "Attribute id")),
    responses(
        (status = 200, body = AttributeWithValuesResponse),
        (status = 404, body = ErrorResponse),
        (status = 500, body = ErrorResponse),
    )
)]
pub async fn get_attribute<A, B>(
    State(state): State<CatalogRouterState<A, B>>,
    Path(attribute_id): Path<i64>,
) -> Result<Json<AttributeWithValuesResponse>, CatalogHandlerErr>
where
    A: AttributeCatalogService,
    B: BindingService,
{
    let attribute = state
        .catalog
        .get_attribute_with_values(attribute_id)
        .await?;
    Ok(Json(attribute.into()))
}

/// Update the given fields of an attribute definition
#[utoipa::path(
    patch,
    tag = "catalog service",
    path = "/attributes/{id}",
    request_body = UpdateAttributeRequest,
    params(
        ("id" = i64, Path, description = "Attribute id"),
        ("x-actor-id" = String, Header, description = "Id of the caller"),
    ),
    responses(
        (status = 200, body = AttributeResponse),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 409, body = ErrorResponse),
        (status = 500, body = ErrorResponse),
    )
)]
pub async fn update_attribute<A, B>(
    State(state): State<CatalogRouterState<A, B>>,
    Actor(ctx): Actor,
    Path(attribute_id): Path<i64>,
    Json(request): Json<UpdateAttributeRequest>,
) -> Result<Json<AttributeResponse>, CatalogHandlerErr>
where
    A: AttributeCatalogService,
    B: BindingService,
{
    let updated = state
        .catalog
        .update_attribute(ctx, attribute_id, request.into())
        .await?;
    Ok(Json(updated.into()))
}

/// Delete an attribute definition and its values
#[utoipa::path(
    delete,
    tag = "catalog service",
    path = "/attributes/{id}",
    params(
        ("id" = i64, Path, description = "Attribute id"),
        ("x-actor-id" = String, Header, description = "Id of the caller"),
    ),
    responses(
        (status = 204),
        (status = 404, body = ErrorResponse),
        (status = 409, body = ErrorResponse, description = "Bindings still reference the attribute"),
        (status = 500, body = ErrorResponse),
    )
)]
pub async fn delete_attribute<A, B>(
    State(state): State<CatalogRouterState<A, B>>,
    Actor(ctx): Actor,
    Path(attribute_id): Path<i64>,
) -> Result<StatusCode, CatalogHandlerErr>
where
    A: AttributeCatalogService,
    B: BindingService,
{
    state.catalog.delete_attribute(ctx, attribute_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the values of an attribute in display order
#[utoipa::path(
    get,
    tag = "catalog service",
    path = "/attributes/{id}/values",
    params(("id" = i64, Path, description = "Attribute id")),
    responses(
        (status = 200, body = Vec<AttributeValueResponse>),
        (status = 404, body = ErrorResponse),
        (status = 500, body = ErrorResponse),
    )
)]
pub async fn list_values<A, B>(
    State(state): State<CatalogRouterState<A, B>>,
    Path(attribute_id): Path<i64>,
) -> Result<Json<Vec<AttributeValueResponse>>, CatalogHandlerErr>
where
    A: AttributeCatalogService,
    B: BindingService,
{
    let values = state.catalog.list_values(attribute_id).await?;
    Ok(Json(values.into_iter().map(Into::into).collect()))
}

/// Add a value to a select attribute
#[utoipa::path(
    post,
    tag = "catalog service",
    path = "/attributes/{id}/values",
    request_body = AttributeValueRequest,
    params(
        ("id" = i64, Path, description = "Attribute id"),
        ("x-actor-id" = String, Header, description = "Id of the caller"),
    ),
    responses(
        (status = 201, body = AttributeValueResponse),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 409, body = ErrorResponse),
        (status = 500, body = ErrorResponse),
    )
)]
pub async fn add_value<A, B>(
    State(state): State<CatalogRouterState<A, B>>,
    Actor(ctx): Actor,
    Path(attribute_id): Path<i64>,
    Json(request): Json<AttributeValueRequest>,
) -> Result<(StatusCode, Json<AttributeValueResponse>), CatalogHandlerErr>
where
    A: AttributeCatalogService,
    B: BindingService,
{
    let added = state
        .catalog
        .add_value(ctx, attribute_id, request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(added.into())))
}

/// Remove a value no binding references
#[utoipa::path(
    delete,
    tag = "catalog service",
    path = "/attributes/{id}/values/{value_id}",
    params(
        ("id" = i64, Path, description = "Attribute id"),
        ("value_id" = i64, Path, description = "Value id"),
        ("x-actor-id" = String, Header, description = "Id of the caller"),
    ),
    responses(
        (status = 204),
        (status = 404, body = ErrorResponse),
        (status = 409, body = ErrorResponse),
        (status = 500, body = ErrorResponse),
    )
)]
pub async fn remove_value<A, B>(
    State(state): State<CatalogRouterState<A, B>>,
    Actor(ctx): Actor,
    Path((attribute_id, value_id)): Path<(i64, i64)>,
) -> Result<StatusCode, CatalogHandlerErr>
where
    A: AttributeCatalogService,
    B: BindingService,
{
    state
        .catalog
        .remove_value(ctx, attribute_id, value_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
