//! How the value of an attribute is captured.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Input kind of an attribute definition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "attribute_input_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputKind {
    /// Arbitrary text typed by the operator.
    FreeText,
    /// Exactly one of the attribute's enumerated values.
    SingleSelect,
    /// Any subset of the attribute's enumerated values.
    MultiSelect,
}

impl InputKind {
    /// true if values are chosen from the attribute's enumerated values
    pub fn is_selectable(&self) -> bool {
        match self {
            InputKind::FreeText => false,
            InputKind::SingleSelect | InputKind::MultiSelect => true,
        }
    }

    /// true if one entity may hold several bindings for the attribute
    pub fn allows_many(&self) -> bool {
        match self {
            InputKind::MultiSelect => true,
            InputKind::FreeText | InputKind::SingleSelect => false,
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::FreeText => write!(f, "FREE_TEXT"),
            InputKind::SingleSelect => write!(f, "SINGLE_SELECT"),
            InputKind::MultiSelect => write!(f, "MULTI_SELECT"),
        }
    }
}
