//! Catalog query service: filter, sort, facet and paginate the product grid.

use std::sync::Arc;

use uuid::Uuid;

use ss_shared::types::{PaginatedResponse, Pagination};

use crate::domain::value_objects::catalog::{
    CatalogPage, CatalogProduct, CatalogQuery, FacetOption,
};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ProductRepository;

/// Read-path service over the product catalog
pub struct CatalogService<P>
where
    P: ProductRepository,
{
    products: Arc<P>,
    page_size: u32,
}

impl<P> CatalogService<P>
where
    P: ProductRepository,
{
    /// Storefront grid size
    pub const DEFAULT_PAGE_SIZE: u32 = 8;

    pub fn new(products: Arc<P>) -> Self {
        Self {
            products,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the page size (tests, admin views)
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Run a catalog query and assemble the full page: products, facet
    /// checkbox lists and pagination metadata.
    ///
    /// The requested page is remembered across filter changes by the
    /// storefront, so it can point past the last page of a newly narrowed
    /// result; such a request is reset to the first page rather than
    /// returning an empty grid.
    pub async fn browse(&self, query: &CatalogQuery) -> DomainResult<CatalogPage> {
        let type_values = self.products.distinct_types().await?;
        let supplier_values = self.products.distinct_supplier_names().await?;

        let requested_page = query.page.max(1);
        let mut pagination = Pagination::new(requested_page, self.page_size);

        let (mut items, total) = self
            .products
            .search(&query.filter, query.sort, pagination)
            .await?;

        let total_pages = ((total + self.page_size as u64 - 1) / self.page_size as u64) as u32;

        // Filters may have shrunk the result since the page number was
        // remembered; fall back to the first page instead of an empty one.
        if requested_page > 1 && requested_page > total_pages {
            pagination = Pagination::new(1, self.page_size);
            let (first_page, _) = self
                .products
                .search(&query.filter, query.sort, pagination)
                .await?;
            items = first_page;
        }

        Ok(CatalogPage {
            products: PaginatedResponse::new(items, pagination, total),
            type_options: FacetOption::from_values(type_values, &query.filter.product_types),
            supplier_options: FacetOption::from_values(
                supplier_values,
                &query.filter.supplier_names,
            ),
            sort: query.sort,
            search: query.filter.search.clone(),
        })
    }

    /// Single product lookup
    pub async fn product(&self, id: Uuid) -> DomainResult<CatalogProduct> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product"))
    }
}
