//! Port definitions - interfaces the domain exposes and depends on

pub use crate::domain::service_port::*;
pub use crate::domain::storage_port::*;
