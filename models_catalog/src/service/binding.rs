//! Service layer binding model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::EntityRef;

/// What a binding points at. Exactly one of value id or free text, by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum BindingTarget {
    /// An enumerated value of a select attribute
    Value(i64),
    /// Text of a free-text attribute
    Text(String),
}

impl BindingTarget {
    /// Convert to database representation (value_id, free_text)
    pub fn to_db_values(&self) -> (Option<i64>, Option<String>) {
        match self {
            BindingTarget::Value(id) => (Some(*id), None),
            BindingTarget::Text(text) => (None, Some(text.clone())),
        }
    }
}

/// Identity of a binding for diffing: which attribute, set to what.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingKey {
    pub attribute_id: i64,
    pub target: BindingTarget,
}

/// A persisted binding (service representation).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Binding {
    pub id: i64,
    pub entity: EntityRef,
    pub attribute_id: i64,
    pub target: BindingTarget,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Binding {
    pub fn key(&self) -> BindingKey {
        BindingKey {
            attribute_id: self.attribute_id,
            target: self.target.clone(),
        }
    }
}

// ===== Conversions =====

impl From<Binding> for crate::api::BindingResponse {
    fn from(svc: Binding) -> Self {
        let (value_id, free_text) = svc.target.to_db_values();
        Self {
            id: svc.id,
            attribute_id: svc.attribute_id,
            value_id,
            free_text,
            created_at: svc.created_at,
        }
    }
}
