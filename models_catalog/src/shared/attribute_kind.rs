//! Attribute classification shared across database, service, and API layers.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// What an attribute describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "attribute_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeKind {
    /// Distinguishes one SKU of a product from another (size, colour).
    Sku,
    /// Sale-facing attribute shown on the product page.
    Sale,
    /// Anything else.
    Other,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Sku => write!(f, "SKU"),
            AttributeKind::Sale => write!(f, "SALE"),
            AttributeKind::Other => write!(f, "OTHER"),
        }
    }
}
