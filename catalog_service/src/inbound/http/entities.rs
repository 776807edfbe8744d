//! Entity binding handlers

use axum::{
    Json,
    extract::{Path, State},
};
use models_catalog::{
    EntityKind, EntityRef,
    api::{BindingResponse, ReconcileRequest, ReconcileResponse},
};

use super::{Actor, CatalogHandlerErr, CatalogRouterState};
use crate::domain::ports::{AttributeCatalogService, BindingService};

/// Replace the bindings of an entity for every attribute named in the request
#[utoipa::path(
    put,
    tag = "catalog service",
    path = "/entities/{kind}/{id}/attributes",
    request_body = ReconcileRequest,
    params(
        ("kind" = EntityKind, Path, description = "product or sku"),
        ("id" = i64, Path, description = "Entity id"),
        ("x-actor-id" = String, Header, description = "Id of the caller"),
    ),
    responses(
        (status = 200, body = ReconcileResponse),
        (status = 404, body = ErrorResponse, description = "Unknown attribute ids"),
        (status = 422, body = ViolationsResponse),
        (status = 500, body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(state, ctx, request), fields(actor = %ctx))]
pub async fn reconcile<A, B>(
    State(state): State<CatalogRouterState<A, B>>,
    Actor(ctx): Actor,
    Path((kind, id)): Path<(EntityKind, i64)>,
    Json(request): Json<ReconcileRequest>,
) -> Result<Json<ReconcileResponse>, CatalogHandlerErr>
where
    A: AttributeCatalogService,
    B: BindingService,
{
    let outcome = state
        .bindings
        .reconcile(ctx, EntityRef { kind, id }, request.assignments)
        .await?;
    Ok(Json(outcome.into()))
}

/// List every binding of an entity
#[utoipa::path(
    get,
    tag = "catalog service",
    path = "/entities/{kind}/{id}/attributes",
    params(
        ("kind" = EntityKind, Path, description = "product or sku"),
        ("id" = i64, Path, description = "Entity id"),
    ),
    responses(
        (status = 200, body = Vec<BindingResponse>),
        (status = 500, body = ErrorResponse),
    )
)]
pub async fn list_bindings<A, B>(
    State(state): State<CatalogRouterState<A, B>>,
    Path((kind, id)): Path<(EntityKind, i64)>,
) -> Result<Json<Vec<BindingResponse>>, CatalogHandlerErr>
where
    A: AttributeCatalogService,
    B: BindingService,
{
    let bindings = state
        .bindings
        .list_entity_bindings(EntityRef { kind, id })
        .await?;
    Ok(Json(bindings.into_iter().map(Into::into).collect()))
}
