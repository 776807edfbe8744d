//! API layer types - external-facing request and response types.
//!
//! These structs represent the HTTP contract and carry ToSchema for OpenAPI documentation.

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
