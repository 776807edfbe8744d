//! Reference to the catalog entity a binding describes.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

/// Kind of catalog entity that can carry attribute bindings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "catalog_entity_kind", rename_all = "lowercase")]
pub enum EntityKind {
    Product,
    Sku,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Product => write!(f, "product"),
            EntityKind::Sku => write!(f, "sku"),
        }
    }
}

/// The input string was not a known [EntityKind]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown entity kind: {0}")]
pub struct ParseEntityKindErr(pub String);

impl FromStr for EntityKind {
    type Err = ParseEntityKindErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(EntityKind::Product),
            "sku" => Ok(EntityKind::Sku),
            other => Err(ParseEntityKindErr(other.to_string())),
        }
    }
}

/// A product or SKU, identified by kind and id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i64,
}

impl EntityRef {
    pub fn product(id: i64) -> Self {
        Self {
            kind: EntityKind::Product,
            id,
        }
    }

    pub fn sku(id: i64) -> Self {
        Self {
            kind: EntityKind::Sku,
            id,
        }
    }

    /// Reconciliations against SKUs only accept SKU-classified attributes.
    pub fn is_sku_scoped(&self) -> bool {
        self.kind == EntityKind::Sku
    }

    /// Stable string used to key per-entity locks.
    pub fn lock_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_formats_lock_keys_per_kind() {
        assert_eq!(EntityRef::sku(42).lock_key(), "sku:42");
        assert_eq!(EntityRef::product(42).lock_key(), "product:42");
        assert_ne!(EntityRef::sku(7), EntityRef::product(7));
    }

    #[test]
    fn it_parses_entity_kinds() {
        assert_eq!("sku".parse::<EntityKind>(), Ok(EntityKind::Sku));
        assert_eq!(
            "brand".parse::<EntityKind>(),
            Err(ParseEntityKindErr("brand".to_string()))
        );
    }
}
