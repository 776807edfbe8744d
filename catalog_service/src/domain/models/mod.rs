//! Domain models. Catalog entities themselves live in `models_catalog::service`;
//! this module adds the types that only the service works with.

mod context;
mod outcomes;

pub use context::RequestContext;
pub use outcomes::{
    AddValueOutcome, CreateAttributeOutcome, DeleteOutcome, ReconcileOutcome,
    UpdateAttributeOutcome,
};

pub use models_catalog::service::{
    AttributeDefinition, AttributePatch, AttributeValue, AttributeWithValues, Binding, BindingKey,
    BindingTarget, DesiredAssignment, NewAttribute, NewAttributeValue, Violation, ViolationKind,
};
pub use models_catalog::{AttributeKind, EntityKind, EntityRef, InputKind};
