use axum::{extract::FromRequestParts, http::request::Parts};

use super::error::CatalogHandlerErr;
use crate::domain::models::RequestContext;

/// Header carrying the id of the caller on mutating requests
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Extracts the [RequestContext] of a request from the [ACTOR_HEADER] header.
#[derive(Debug, Clone)]
pub struct Actor(pub RequestContext);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = CatalogHandlerErr;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|actor| !actor.is_empty())
            .map(|actor| Actor(RequestContext::new(actor)))
            .ok_or(CatalogHandlerErr::MissingActor)
    }
}
