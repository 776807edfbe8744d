//! Database layer attribute value model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attribute value row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttributeValue {
    pub id: i64,
    pub attribute_id: i64,
    pub value: String,
    pub sort_score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ===== Conversions =====

impl From<AttributeValue> for crate::service::AttributeValue {
    fn from(db: AttributeValue) -> Self {
        Self {
            id: db.id,
            attribute_id: db.attribute_id,
            value: db.value,
            sort_score: db.sort_score,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
