use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use models_catalog::api::ViolationsResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::context::ACTOR_HEADER;
use crate::domain::error::CatalogError;

/// Body of every non-2xx response except rejected reconciliations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum CatalogHandlerErr {
    #[error("missing {ACTOR_HEADER} header")]
    MissingActor,
    #[error(transparent)]
    Domain(#[from] CatalogError),
}

impl IntoResponse for CatalogHandlerErr {
    fn into_response(self) -> Response {
        let err = match self {
            CatalogHandlerErr::MissingActor => {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        message: CatalogHandlerErr::MissingActor.to_string(),
                    }),
                )
                    .into_response();
            }
            CatalogHandlerErr::Domain(err) => err,
        };

        let status = match &err {
            CatalogError::AttributeNotFound(_) | CatalogError::AttributeValueNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            CatalogError::DuplicateName(_)
            | CatalogError::DuplicateValue { .. }
            | CatalogError::AttributeStillReferenced { .. }
            | CatalogError::ValueStillReferenced { .. } => StatusCode::CONFLICT,
            CatalogError::InvalidDefinition(_) => StatusCode::BAD_REQUEST,
            CatalogError::Rejected(violations) => {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ViolationsResponse {
                        message: err.to_string(),
                        violations: violations.clone(),
                    }),
                )
                    .into_response();
            }
            CatalogError::Internal(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        message: "An internal server error has occurred".to_string(),
                    }),
                )
                    .into_response();
            }
        };

        (
            status,
            Json(ErrorResponse {
                message: err.to_string(),
            }),
        )
            .into_response()
    }
}
