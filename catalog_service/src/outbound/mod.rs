//! Outbound adapters - implementations of domain ports

#[cfg(any(test, feature = "mock"))]
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(any(test, feature = "mock"))]
pub use memory::InMemoryCatalogStorage;
#[cfg(feature = "postgres")]
pub use postgres::CatalogPgStorage;
