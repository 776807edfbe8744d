//! Pure rule checks. Nothing here touches storage.

use std::collections::HashSet;

use models_catalog::service::attribute_definition::MAX_ATTRIBUTE_NAME_LEN;
use models_catalog::service::attribute_value::MAX_ATTRIBUTE_VALUE_LEN;

use crate::domain::models::{
    AttributeDefinition, AttributeKind, AttributeWithValues, BindingTarget, DesiredAssignment,
    EntityRef, InputKind, NewAttribute, ViolationKind,
};


/// Checks one desired assignment against its attribute.
///
/// Returns the target to bind, or `None` when the assignment clears the attribute.
/// The first failing rule wins.
pub fn validate_assignment(
    assignment: &DesiredAssignment,
    attribute: &AttributeWithValues,
    entity: EntityRef,
) -> Result<Option<BindingTarget>, ViolationKind> {
    let definition = &attribute.definition;

    if entity.is_sku_scoped() && definition.attribute_kind != AttributeKind::Sku {
        return Err(ViolationKind::AttributeTypeNotSku);
    }

    match (
        definition.input_kind,
        assignment.value_id,
        assignment.free_text.as_deref(),
    ) {
        // any text at all, even blank, is the wrong input for a select attribute
        (InputKind::SingleSelect | InputKind::MultiSelect, _, Some(_)) => {
            Err(ViolationKind::InvalidInputForSelectType)
        }
        (InputKind::SingleSelect | InputKind::MultiSelect, Some(value_id), None) => {
            if attribute.owns_value(value_id) {
                Ok(Some(BindingTarget::Value(value_id)))
            } else {
                Err(ViolationKind::AttributeValueNotFound)
            }
        }
        (InputKind::FreeText, Some(_), _) => Err(ViolationKind::InvalidInputForTextType),
        (InputKind::FreeText, None, Some(text)) if !text.trim().is_empty() => {
            Ok(Some(BindingTarget::Text(text.to_string())))
        }
        (_, None, _) if definition.required => Err(ViolationKind::RequiredValueEmpty),
        (_, None, _) => Ok(None),
    }
}

/// Checks the shape of a definition: name rules and SKU attributes being selectable.
pub fn validate_definition(definition: &AttributeDefinition) -> Result<(), String> {
    validate_name(&definition.name)?;
    validate_kinds(definition.attribute_kind, definition.input_kind)
}

/// Checks a definition about to be created, including its initial values.
pub fn validate_new_attribute(attribute: &NewAttribute) -> Result<(), String> {
    validate_name(&attribute.name)?;
    validate_kinds(attribute.attribute_kind, attribute.input_kind)?;

    if !attribute.values.is_empty() && !attribute.input_kind.is_selectable() {
        return Err(format!(
            "{} attributes cannot own values",
            attribute.input_kind
        ));
    }

    let mut seen = HashSet::new();
    for value in &attribute.values {
        validate_value_text(&value.value)?;
        if !seen.insert(value.value.as_str()) {
            return Err(format!("value {:?} is listed more than once", value.value));
        }
    }

    Ok(())
}

/// Checks the text of an attribute value.
pub fn validate_value_text(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("value must not be blank".to_string());
    }
    if value.chars().count() > MAX_ATTRIBUTE_VALUE_LEN {
        return Err(format!(
            "value must be at most {MAX_ATTRIBUTE_VALUE_LEN} characters"
        ));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name must not be blank".to_string());
    }
    if name.chars().count() > MAX_ATTRIBUTE_NAME_LEN {
        return Err(format!(
            "name must be at most {MAX_ATTRIBUTE_NAME_LEN} characters"
        ));
    }
    Ok(())
}

fn validate_kinds(attribute_kind: AttributeKind, input_kind: InputKind) -> Result<(), String> {
    if attribute_kind == AttributeKind::Sku && !input_kind.is_selectable() {
        return Err(format!(
            "{attribute_kind} attributes must be selectable, got {input_kind}"
        ));
    }
    Ok(())
}
