//! The sole responsibility of this crate is to expose the statically imported sql migrations for the catalog database.
//!
//! The migrations live next to catalog_db_client so that queries and schema change together,
//! while test and binary crates can run them without pulling in the client.
pub static CATALOG_DB_MIGRATIONS: sqlx::migrate::Migrator =
    sqlx::migrate!("../catalog_db_client/migrations");
