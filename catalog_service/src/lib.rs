//! Catalog Service library following hexagonal architecture pattern
//!
//! Owns attribute definitions and their values, and reconciles the attribute bindings
//! of products and SKUs against caller-supplied assignments. The domain can be driven
//! by the HTTP adapter in [inbound] or called directly by other services.

pub mod domain;
pub mod inbound;
pub mod outbound;
