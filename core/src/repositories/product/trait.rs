//! Product repository trait: the catalog read path.

use async_trait::async_trait;
use uuid::Uuid;

use ss_shared::types::Pagination;

use crate::domain::value_objects::catalog::{CatalogFilter, CatalogProduct, ProductSort};
use crate::errors::DomainError;

/// Repository trait for catalog queries
///
/// Filtering, sorting and pagination are pushed down to the store so the
/// service never loads the whole catalog.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Search the catalog. Returns the page of products (joined with their
    /// supplier names) and the total match count before pagination.
    async fn search(
        &self,
        filter: &CatalogFilter,
        sort: ProductSort,
        pagination: Pagination,
    ) -> Result<(Vec<CatalogProduct>, u64), DomainError>;

    /// Find a single product with its supplier name
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CatalogProduct>, DomainError>;

    /// Distinct product types across the whole catalog, for the facet list
    async fn distinct_types(&self) -> Result<Vec<String>, DomainError>;

    /// Distinct supplier names across the whole catalog, for the facet list
    async fn distinct_supplier_names(&self) -> Result<Vec<String>, DomainError>;
}
