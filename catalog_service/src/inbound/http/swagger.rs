use models_catalog::api;
use models_catalog::service::{DesiredAssignment, Violation, ViolationKind};
use utoipa::OpenApi;

use super::error::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Attribute definitions
        crate::inbound::http::attributes::create_attribute,
        crate::inbound::http::attributes::list_attributes,
        crate::inbound::http::attributes::get_attribute,
        crate::inbound::http::attributes::update_attribute,
        crate::inbound::http::attributes::delete_attribute,
        // Attribute values
        crate::inbound::http::attributes::list_values,
        crate::inbound::http::attributes::add_value,
        crate::inbound::http::attributes::remove_value,
        // Entity bindings
        crate::inbound::http::entities::reconcile,
        crate::inbound::http::entities::list_bindings,
    ),
    components(
        schemas(
            api::CreateAttributeRequest,
            api::UpdateAttributeRequest,
            api::AttributeValueRequest,
            api::ReconcileRequest,
            api::AttributeResponse,
            api::AttributeValueResponse,
            api::AttributeWithValuesResponse,
            api::BindingResponse,
            api::ReconcileResponse,
            api::ViolationsResponse,
            DesiredAssignment,
            Violation,
            ViolationKind,
            ErrorResponse,
            models_catalog::AttributeKind,
            models_catalog::InputKind,
            models_catalog::EntityKind,
        )
    ),
    tags(
        (name = "catalog service", description = "Product catalog attributes and bindings")
    )
)]
pub struct ApiDoc;
