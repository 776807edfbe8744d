//! Rejections produced when validating desired assignments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a single assignment was rejected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    /// value id does not exist or belongs to another attribute
    AttributeValueNotFound,
    /// a SKU reconciliation referenced a non-SKU attribute
    AttributeTypeNotSku,
    /// free text supplied for a select attribute
    InvalidInputForSelectType,
    /// value id supplied for a free-text attribute
    InvalidInputForTextType,
    /// required attribute supplied without a value
    RequiredValueEmpty,
    /// several values supplied for a single-valued attribute
    TooManyValues,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViolationKind::AttributeValueNotFound => "attribute value not found",
            ViolationKind::AttributeTypeNotSku => "attribute is not a SKU attribute",
            ViolationKind::InvalidInputForSelectType => "select attribute given free text",
            ViolationKind::InvalidInputForTextType => "free-text attribute given a value id",
            ViolationKind::RequiredValueEmpty => "required attribute has no value",
            ViolationKind::TooManyValues => "single-valued attribute given several values",
        };
        f.write_str(s)
    }
}

/// A rejected assignment, localized to its attribute (and value when one was given).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, utoipa::ToSchema)]
pub struct Violation {
    pub attribute_id: i64,
    pub value_id: Option<i64>,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value_id {
            Some(value_id) => write!(
                f,
                "attribute {} (value {}): {}",
                self.attribute_id, value_id, self.kind
            ),
            None => write!(f, "attribute {}: {}", self.attribute_id, self.kind),
        }
    }
}
