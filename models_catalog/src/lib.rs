//! Catalog Models
//!
//! Data models for the product-catalog attribute system, split into layers:
//!
//! - **shared**: enums used by every layer (AttributeKind, InputKind, EntityRef)
//! - **db**: row types read by catalog_db_client
//! - **service**: domain representations used by catalog_service
//! - **api**: external-facing request/response types

pub mod api;
pub mod db;
pub mod service;
pub mod shared;

pub use shared::{AttributeKind, EntityKind, EntityRef, InputKind};
