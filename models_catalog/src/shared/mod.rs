pub mod attribute_kind;
pub mod entity_ref;
pub mod input_kind;

pub use attribute_kind::AttributeKind;
pub use entity_ref::{EntityKind, EntityRef, ParseEntityKindErr};
pub use input_kind::InputKind;
