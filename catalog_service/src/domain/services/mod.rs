//! Domain services - concrete implementations of service ports

mod catalog;
mod reconciler;

#[cfg(test)]
mod tests;

pub use reconciler::{ReconcilePlan, plan_reconciliation};

use crate::domain::error::CatalogError;
use crate::domain::ports::{CatalogStorage, RelationStore};

/// Concrete implementation of [AttributeCatalogService](crate::domain::ports::AttributeCatalogService)
/// and [BindingService](crate::domain::ports::BindingService)
pub struct CatalogServiceImpl<C, R> {
    catalog: C,
    relations: R,
}

impl<C, R> CatalogServiceImpl<C, R>
where
    C: CatalogStorage,
    R: RelationStore,
{
    /// Create a new catalog service over the given storage
    pub fn new(catalog: C, relations: R) -> Self {
        Self { catalog, relations }
    }
}

/// Wraps a storage failure as [CatalogError::Internal], logging it once here.
fn internal<E>(err: E) -> CatalogError
where
    anyhow::Error: From<E>,
{
    let err = anyhow::Error::from(err);
    tracing::error!(error = ?err, "storage failure");
    CatalogError::Internal(err)
}
