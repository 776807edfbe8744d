//! Database layer types - used only by catalog_db_client.
//!
//! These structs directly map to database rows and include all database fields.
//! They should not be exposed outside of the db_client.

pub mod attribute_definition;
pub mod attribute_value;
pub mod binding;
pub mod error;

pub use attribute_definition::AttributeDefinition;
pub use attribute_value::AttributeValue;
pub use binding::Binding;
pub use error::DbConversionError;
