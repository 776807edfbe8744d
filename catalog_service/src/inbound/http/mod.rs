//! HTTP inbound adapter - thin axum handlers translating requests into service calls

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{delete, get, put},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::domain::ports::{AttributeCatalogService, BindingService};

pub mod attributes;
pub mod context;
pub mod entities;
pub mod error;
mod health;
pub mod swagger;


pub use context::{ACTOR_HEADER, Actor};
pub use error::{CatalogHandlerErr, ErrorResponse};

pub struct CatalogRouterState<A, B> {
    catalog: Arc<A>,
    bindings: Arc<B>,
}

impl<A, B> Clone for CatalogRouterState<A, B> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            bindings: self.bindings.clone(),
        }
    }
}

impl<A, B> CatalogRouterState<A, B>
where
    A: AttributeCatalogService,
    B: BindingService,
{
    pub fn new(catalog: Arc<A>, bindings: Arc<B>) -> Self {
        Self { catalog, bindings }
    }
}

/// Routes for attribute definitions, their values, and entity bindings
pub fn catalog_router<A, B, S>(state: CatalogRouterState<A, B>) -> Router<S>
where
    A: AttributeCatalogService,
    B: BindingService,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/attributes",
            get(attributes::list_attributes::<A, B>).post(attributes::create_attribute::<A, B>),
        )
        .route(
            "/attributes/:id",
            get(attributes::get_attribute::<A, B>)
                .patch(attributes::update_attribute::<A, B>)
                .delete(attributes::delete_attribute::<A, B>),
        )
        .route(
            "/attributes/:id/values",
            get(attributes::list_values::<A, B>).post(attributes::add_value::<A, B>),
        )
        .route(
            "/attributes/:id/values/:value_id",
            delete(attributes::remove_value::<A, B>),
        )
        .route(
            "/entities/:kind/:id/attributes",
            put(entities::reconcile::<A, B>).get(entities::list_bindings::<A, B>),
        )
        .with_state(state)
}

/// The full application: catalog routes, health check and OpenAPI document
pub fn app<A, B>(state: CatalogRouterState<A, B>) -> Router
where
    A: AttributeCatalogService,
    B: BindingService,
{
    catalog_router(state)
        .layer(TraceLayer::new_for_http())
        .merge(health::router())
        .route("/api-doc/openapi.json", get(openapi))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(swagger::ApiDoc::openapi())
}
