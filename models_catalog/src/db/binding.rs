//! Database layer binding model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::error::DbConversionError;
use crate::service::BindingTarget;
use crate::shared::{EntityKind, EntityRef};

/// Attribute binding row.
///
/// The table stores the value id and the free text in separate nullable columns,
/// which are converted to the service layer's [BindingTarget] enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binding {
    pub id: i64,
    pub entity_kind: EntityKind,
    pub entity_id: i64,
    pub attribute_id: i64,
    pub value_id: Option<i64>,
    pub free_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for Binding {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;

        Ok(Binding {
            id: row.try_get("id")?,
            entity_kind: row.try_get("entity_kind")?,
            entity_id: row.try_get("entity_id")?,
            attribute_id: row.try_get("attribute_id")?,
            value_id: row.try_get("value_id")?,
            free_text: row.try_get("free_text")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

// ===== Conversions =====

impl TryFrom<Binding> for crate::service::Binding {
    type Error = DbConversionError;

    fn try_from(db: Binding) -> Result<Self, Self::Error> {
        let target = match (db.value_id, db.free_text) {
            (Some(value_id), None) => BindingTarget::Value(value_id),
            (None, Some(text)) => BindingTarget::Text(text),
            (Some(_), Some(_)) => {
                return Err(DbConversionError::BindingBothTargetsSet { id: db.id });
            }
            (None, None) => {
                return Err(DbConversionError::BindingNoTargetSet { id: db.id });
            }
        };

        Ok(Self {
            id: db.id,
            entity: EntityRef {
                kind: db.entity_kind,
                id: db.entity_id,
            },
            attribute_id: db.attribute_id,
            target,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
