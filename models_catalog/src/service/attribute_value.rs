//! Service layer attribute value model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest text an attribute value may carry.
pub const MAX_ATTRIBUTE_VALUE_LEN: usize = 255;

/// One admissible choice of a select attribute (service representation).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, utoipa::ToSchema)]
pub struct AttributeValue {
    pub id: i64,
    pub attribute_id: i64,
    pub value: String,
    pub sort_score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An attribute value to be created under an existing or new definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAttributeValue {
    pub value: String,
    pub sort_score: i32,
}

impl NewAttributeValue {
    pub fn new(value: impl Into<String>, sort_score: i32) -> Self {
        Self {
            value: value.into(),
            sort_score,
        }
    }
}

/// Orders values by sort score descending, then by id ascending.
pub fn sort_for_display(values: &mut [AttributeValue]) {
    values.sort_by(|a, b| b.sort_score.cmp(&a.sort_score).then(a.id.cmp(&b.id)));
}

// ===== Conversions =====

impl From<AttributeValue> for crate::api::AttributeValueResponse {
    fn from(svc: AttributeValue) -> Self {
        Self {
            id: svc.id,
            attribute_id: svc.attribute_id,
            value: svc.value,
            sort_score: svc.sort_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(id: i64, sort_score: i32) -> AttributeValue {
        AttributeValue {
            id,
            attribute_id: 1,
            value: format!("v{id}"),
            sort_score,
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }

    #[test]
    fn it_sorts_by_score_then_id() {
        let mut values = vec![value(3, 1), value(1, 1), value(2, 5)];
        sort_for_display(&mut values);
        let ids: Vec<i64> = values.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
