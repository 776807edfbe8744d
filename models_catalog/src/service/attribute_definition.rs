//! Service layer attribute definition model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attribute_value::{AttributeValue, NewAttributeValue};
use crate::shared::{AttributeKind, InputKind};

/// Longest name an attribute definition may carry.
pub const MAX_ATTRIBUTE_NAME_LEN: usize = 64;

/// Attribute definition (service representation).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
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

/// Attribute definition together with its owned values, ordered for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct AttributeWithValues {
    pub definition: AttributeDefinition,
    pub values: Vec<AttributeValue>,
}

impl AttributeWithValues {
    /// true if `value_id` names one of this attribute's own values
    pub fn owns_value(&self, value_id: i64) -> bool {
        self.values.iter().any(|v| v.id == value_id)
    }
}

/// Attribute definition to be created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAttribute {
    pub name: String,
    pub sort_score: i32,
    pub visible: bool,
    pub attribute_kind: AttributeKind,
    pub input_kind: InputKind,
    pub required: bool,
    pub searchable: bool,
    pub values: Vec<NewAttributeValue>,
}

/// Partial update of an attribute definition. `None` leaves the stored field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributePatch {
    pub name: Option<String>,
    pub sort_score: Option<i32>,
    pub visible: Option<bool>,
    pub attribute_kind: Option<AttributeKind>,
    pub input_kind: Option<InputKind>,
    pub required: Option<bool>,
    pub searchable: Option<bool>,
}

impl AttributePatch {
    pub fn is_empty(&self) -> bool {
        *self == AttributePatch::default()
    }

    /// The definition as it would look after the patch was applied.
    pub fn apply_to(&self, current: &AttributeDefinition) -> AttributeDefinition {
        AttributeDefinition {
            id: current.id,
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            sort_score: self.sort_score.unwrap_or(current.sort_score),
            visible: self.visible.unwrap_or(current.visible),
            attribute_kind: self.attribute_kind.unwrap_or(current.attribute_kind),
            input_kind: self.input_kind.unwrap_or(current.input_kind),
            required: self.required.unwrap_or(current.required),
            searchable: self.searchable.unwrap_or(current.searchable),
            created_at: current.created_at,
            updated_at: current.updated_at,
        }
    }

    /// true if the patch would change how existing bindings are interpreted
    pub fn changes_input_kind(&self, current: &AttributeDefinition) -> bool {
        self.input_kind
            .is_some_and(|input_kind| input_kind != current.input_kind)
    }
}

// ===== Conversions =====

impl From<AttributeDefinition> for crate::api::AttributeResponse {
    fn from(svc: AttributeDefinition) -> Self {
        Self {
            id: svc.id,
            name: svc.name,
            sort_score: svc.sort_score,
            visible: svc.visible,
            attribute_kind: svc.attribute_kind,
            input_kind: svc.input_kind,
            required: svc.required,
            searchable: svc.searchable,
            created_at: svc.created_at,
            updated_at: svc.updated_at,
        }
    }
}

impl From<AttributeWithValues> for crate::api::AttributeWithValuesResponse {
    fn from(svc: AttributeWithValues) -> Self {
        Self {
            definition: svc.definition.into(),
            values: svc.values.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> AttributeDefinition {
        AttributeDefinition {
            id: 5,
            name: "Colour".to_string(),
            sort_score: 10,
            visible: true,
            attribute_kind: AttributeKind::Sku,
            input_kind: InputKind::SingleSelect,
            required: false,
            searchable: true,
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }

    #[test]
    fn it_only_applies_present_fields() {
        let patch = AttributePatch {
            sort_score: Some(99),
            required: Some(true),
            ..Default::default()
        };

        let merged = patch.apply_to(&definition());

        assert_eq!(merged.sort_score, 99);
        assert!(merged.required);
        assert_eq!(merged.name, "Colour");
        assert_eq!(merged.input_kind, InputKind::SingleSelect);
    }

    #[test]
    fn it_detects_input_kind_changes() {
        let same = AttributePatch {
            input_kind: Some(InputKind::SingleSelect),
            ..Default::default()
        };
        let different = AttributePatch {
            input_kind: Some(InputKind::MultiSelect),
            ..Default::default()
        };

        assert!(!same.changes_input_kind(&definition()));
        assert!(different.changes_input_kind(&definition()));
        assert!(AttributePatch::default().is_empty());
    }
}
