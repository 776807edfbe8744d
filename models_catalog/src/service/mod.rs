//! Service layer types - the representations the domain works with.

pub mod assignment;
pub mod attribute_definition;
pub mod attribute_value;
pub mod binding;
pub mod violation;

pub use assignment::DesiredAssignment;
pub use attribute_definition::{
    AttributeDefinition, AttributePatch, AttributeWithValues, NewAttribute,
};
pub use attribute_value::{AttributeValue, NewAttributeValue};
pub use binding::{Binding, BindingKey, BindingTarget};
pub use violation::{Violation, ViolationKind};
