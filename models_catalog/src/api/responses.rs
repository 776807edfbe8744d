//! API layer response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::Violation;
use crate::shared::{AttributeKind, InputKind};

/// Attribute definition response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AttributeResponse {
    pub id: i64,
    pub name: String,
    pub sort_score: i32,
    pub visible: bool,
    pub attribute_kind: AttributeKind,
    pub input_kind: InputKind,
    pub required: bool,
    pub searchable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attribute value response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AttributeValueResponse {
    pub id: i64,
    pub attribute_id: i64,
    pub value: String,
    pub sort_score: i32,
}

/// Attribute definition with its values.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AttributeWithValuesResponse {
    #[serde(flatten)]
    pub definition: AttributeResponse,
    pub values: Vec<AttributeValueResponse>,
}

/// A persisted binding of an entity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct BindingResponse {
    pub id: i64,
    pub attribute_id: i64,
    pub value_id: Option<i64>,
    pub free_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Write counts of a reconciliation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ReconcileResponse {
    pub inserted: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

/// Every violation found in a rejected reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ViolationsResponse {
    pub message: String,
    pub violations: Vec<Violation>,
}
