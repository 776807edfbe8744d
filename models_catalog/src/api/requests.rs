//! API layer request types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::{AttributePatch, DesiredAssignment, NewAttribute, NewAttributeValue};
use crate::shared::{AttributeKind, InputKind};

fn default_true() -> bool {
    true
}

/// An enumerated value supplied while creating or extending a select attribute.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AttributeValueRequest {
    pub value: String,
    #[serde(default)]
    pub sort_score: i32,
}

impl From<AttributeValueRequest> for NewAttributeValue {
    fn from(api: AttributeValueRequest) -> Self {
        NewAttributeValue::new(api.value, api.sort_score)
    }
}

/// Request to define a new attribute.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CreateAttributeRequest {
    pub name: String,
    #[serde(default)]
    pub sort_score: i32,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub attribute_kind: AttributeKind,
    pub input_kind: InputKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub values: Vec<AttributeValueRequest>,
}

impl From<CreateAttributeRequest> for NewAttribute {
    fn from(api: CreateAttributeRequest) -> Self {
        NewAttribute {
            name: api.name,
            sort_score: api.sort_score,
            visible: api.visible,
            attribute_kind: api.attribute_kind,
            input_kind: api.input_kind,
            required: api.required,
            searchable: api.searchable,
            values: api.values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Partial update of an attribute. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UpdateAttributeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sort_score: Option<i32>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub attribute_kind: Option<AttributeKind>,
    #[serde(default)]
    pub input_kind: Option<InputKind>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub searchable: Option<bool>,
}

impl From<UpdateAttributeRequest> for AttributePatch {
    fn from(api: UpdateAttributeRequest) -> Self {
        AttributePatch {
            name: api.name,
            sort_score: api.sort_score,
            visible: api.visible,
            attribute_kind: api.attribute_kind,
            input_kind: api.input_kind,
            required: api.required,
            searchable: api.searchable,
        }
    }
}

/// Replace the bindings of an entity for every attribute named in `assignments`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ReconcileRequest {
    pub assignments: Vec<DesiredAssignment>,
}
