//! Catalog Database Client
//!
//! Database access functions for the catalog service: attribute definitions, their
//! enumerated values, and the bindings that attach them to products and SKUs.

pub mod attribute_definitions;
pub mod attribute_values;
pub mod bindings;
pub mod error;
