//! Caller-supplied attribute assignment.

use serde::{Deserialize, Serialize};

/// One desired `(attribute, value | text)` fact for an entity.
///
/// Neither `value_id` nor non-blank `free_text` means "this attribute has no value":
/// the attribute is still in scope, so its stored bindings are removed. Select
/// attributes accept no `free_text` at all, blank or not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, utoipa::ToSchema)]
pub struct DesiredAssignment {
    pub attribute_id: i64,
    #[serde(default)]
    pub value_id: Option<i64>,
    #[serde(default)]
    pub free_text: Option<String>,
}

impl DesiredAssignment {
    pub fn value(attribute_id: i64, value_id: i64) -> Self {
        Self {
            attribute_id,
            value_id: Some(value_id),
            free_text: None,
        }
    }

    pub fn text(attribute_id: i64, text: impl Into<String>) -> Self {
        Self {
            attribute_id,
            value_id: None,
            free_text: Some(text.into()),
        }
    }

    pub fn clear(attribute_id: i64) -> Self {
        Self {
            attribute_id,
            value_id: None,
            free_text: None,
        }
    }
}
