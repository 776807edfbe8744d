//! Database layer attribute definition model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{AttributeKind, InputKind};

/// Attribute definition row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttributeDefinition {
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

// ===== Conversions =====

impl From<AttributeDefinition> for crate::service::AttributeDefinition {
    fn from(db: AttributeDefinition) -> Self {
        Self {
            id: db.id,
            name: db.name,
            sort_score: db.sort_score,
            visible: db.visible,
            attribute_kind: db.attribute_kind,
            input_kind: db.input_kind,
            required: db.required,
            searchable: db.searchable,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
