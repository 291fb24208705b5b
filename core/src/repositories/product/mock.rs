//! Mock implementation of ProductRepository for testing
//!
//! Filtering and sorting mirror what the SQL implementation does, so the
//! catalog service can be tested end to end against it.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use ss_shared::types::Pagination;

use crate::domain::value_objects::catalog::{CatalogFilter, CatalogProduct, ProductSort};
use crate::errors::DomainError;

use super::trait_::ProductRepository;

/// Mock product repository for testing
#[derive(Default)]
pub struct MockProductRepository {
    products: Arc<RwLock<Vec<CatalogProduct>>>,
}

impl MockProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the catalog with a product
    pub async fn insert(&self, product: CatalogProduct) {
        self.products.write().await.push(product);
    }

    fn matches(filter: &CatalogFilter, entry: &CatalogProduct) -> bool {
        if let Some(search) = filter.search.as_deref() {
            if !search.is_empty()
                && !entry
                    .product
                    .name
                    .to_lowercase()
                    .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        if !filter.product_types.is_empty()
            && !filter.product_types.contains(&entry.product.product_type)
        {
            return false;
        }
        if !filter.supplier_names.is_empty()
            && !filter.supplier_names.contains(&entry.supplier_name)
        {
            return false;
        }
        true
    }

    fn sort(products: &mut [CatalogProduct], sort: ProductSort) {
        match sort {
            ProductSort::NameAsc => products.sort_by(|a, b| a.product.name.cmp(&b.product.name)),
            ProductSort::NameDesc => products.sort_by(|a, b| b.product.name.cmp(&a.product.name)),
            ProductSort::PriceAsc => {
                products.sort_by(|a, b| a.product.price.cmp(&b.product.price))
            }
            ProductSort::PriceDesc => {
                products.sort_by(|a, b| b.product.price.cmp(&a.product.price))
            }
            ProductSort::SupplierAsc => {
                products.sort_by(|a, b| a.supplier_name.cmp(&b.supplier_name))
            }
            ProductSort::SupplierDesc => {
                products.sort_by(|a, b| b.supplier_name.cmp(&a.supplier_name))
            }
        }
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn search(
        &self,
        filter: &CatalogFilter,
        sort: ProductSort,
        pagination: Pagination,
    ) -> Result<(Vec<CatalogProduct>, u64), DomainError> {
        let products = self.products.read().await;

        let mut matching: Vec<CatalogProduct> = products
            .iter()
            .filter(|p| Self::matches(filter, p))
            .cloned()
            .collect();
        Self::sort(&mut matching, sort);

        let total = matching.len() as u64;
        let page: Vec<CatalogProduct> = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CatalogProduct>, DomainError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.product.id == id).cloned())
    }

    async fn distinct_types(&self) -> Result<Vec<String>, DomainError> {
        let products = self.products.read().await;
        let mut types: Vec<String> = Vec::new();
        for p in products.iter() {
            if !types.contains(&p.product.product_type) {
                types.push(p.product.product_type.clone());
            }
        }
        Ok(types)
    }

    async fn distinct_supplier_names(&self) -> Result<Vec<String>, DomainError> {
        let products = self.products.read().await;
        let mut names: Vec<String> = Vec::new();
        for p in products.iter() {
            if !names.contains(&p.supplier_name) {
                names.push(p.supplier_name.clone());
            }
        }
        Ok(names)
    }
}
