//! MySQL implementation of the ProductRepository trait.
//!
//! Filtering, sorting and pagination all happen in SQL; the catalog is
//! never loaded whole.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use ss_core::domain::entities::product::Product;
use ss_core::domain::value_objects::catalog::{CatalogFilter, CatalogProduct, ProductSort};
use ss_core::errors::DomainError;
use ss_core::repositories::ProductRepository;
use ss_shared::types::Pagination;

use super::{map_sqlx_err, parse_uuid};

const PRODUCT_COLUMNS: &str = "p.id, p.supplier_id, p.name, p.description, p.product_type, \
     p.price, p.stock, s.name AS supplier_name";

/// MySQL implementation of ProductRepository
pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: &sqlx::mysql::MySqlRow) -> Result<CatalogProduct, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::internal(e))?;
        let supplier_id: String = row
            .try_get("supplier_id")
            .map_err(|e| DomainError::internal(e))?;

        Ok(CatalogProduct {
            product: Product {
                id: parse_uuid(&id, "id")?,
                supplier_id: parse_uuid(&supplier_id, "supplier_id")?,
                name: row.try_get("name").map_err(|e| DomainError::internal(e))?,
                description: row
                    .try_get("description")
                    .map_err(|e| DomainError::internal(e))?,
                product_type: row
                    .try_get("product_type")
                    .map_err(|e| DomainError::internal(e))?,
                price: row
                    .try_get::<Decimal, _>("price")
                    .map_err(|e| DomainError::internal(e))?,
                stock: row.try_get("stock").map_err(|e| DomainError::internal(e))?,
            },
            supplier_name: row
                .try_get("supplier_name")
                .map_err(|e| DomainError::internal(e))?,
        })
    }

    /// Append the filter's WHERE conditions to a query under construction
    fn push_filter<'a>(builder: &mut QueryBuilder<'a, sqlx::MySql>, filter: &'a CatalogFilter) {
        if let Some(search) = filter.search.as_deref() {
            if !search.is_empty() {
                builder
                    .push(" AND LOWER(p.name) LIKE ")
                    .push_bind(format!("%{}%", search.to_lowercase()));
            }
        }

        if !filter.product_types.is_empty() {
            builder.push(" AND p.product_type IN (");
            let mut separated = builder.separated(", ");
            for product_type in &filter.product_types {
                separated.push_bind(product_type);
            }
            separated.push_unseparated(")");
        }

        if !filter.supplier_names.is_empty() {
            builder.push(" AND s.name IN (");
            let mut separated = builder.separated(", ");
            for supplier in &filter.supplier_names {
                separated.push_bind(supplier);
            }
            separated.push_unseparated(")");
        }
    }

    fn order_clause(sort: ProductSort) -> &'static str {
        match sort {
            ProductSort::NameAsc => " ORDER BY p.name ASC, p.id ASC",
            ProductSort::NameDesc => " ORDER BY p.name DESC, p.id ASC",
            ProductSort::PriceAsc => " ORDER BY p.price ASC, p.id ASC",
            ProductSort::PriceDesc => " ORDER BY p.price DESC, p.id ASC",
            ProductSort::SupplierAsc => " ORDER BY s.name ASC, p.id ASC",
            ProductSort::SupplierDesc => " ORDER BY s.name DESC, p.id ASC",
        }
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn search(
        &self,
        filter: &CatalogFilter,
        sort: ProductSort,
        pagination: Pagination,
    ) -> Result<(Vec<CatalogProduct>, u64), DomainError> {
        let mut count_builder: QueryBuilder<sqlx::MySql> = QueryBuilder::new(
            "SELECT COUNT(*) AS total FROM products p \
             INNER JOIN suppliers s ON s.id = p.supplier_id WHERE 1 = 1",
        );
        Self::push_filter(&mut count_builder, filter);

        let count_row = count_builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("failed to count products", e))?;
        let total: i64 = count_row
            .try_get("total")
            .map_err(|e| DomainError::internal(e))?;

        let mut builder: QueryBuilder<sqlx::MySql> = QueryBuilder::new(format!(
            "SELECT {} FROM products p \
             INNER JOIN suppliers s ON s.id = p.supplier_id WHERE 1 = 1",
            PRODUCT_COLUMNS
        ));
        Self::push_filter(&mut builder, filter);
        builder.push(Self::order_clause(sort));
        builder
            .push(" LIMIT ")
            .push_bind(pagination.limit_i64())
            .push(" OFFSET ")
            .push_bind(pagination.offset_i64());

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("failed to search products", e))?;

        let products = rows
            .iter()
            .map(Self::row_to_product)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((products, total as u64))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CatalogProduct>, DomainError> {
        let query = format!(
            "SELECT {} FROM products p \
             INNER JOIN suppliers s ON s.id = p.supplier_id \
             WHERE p.id = ? LIMIT 1",
            PRODUCT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("failed to find product", e))?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn distinct_types(&self) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query(
            "SELECT DISTINCT product_type FROM products ORDER BY product_type",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to list product types", e))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("product_type")
                    .map_err(|e| DomainError::internal(e))
            })
            .collect()
    }

    async fn distinct_supplier_names(&self) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query(
            "SELECT DISTINCT s.name FROM suppliers s \
             INNER JOIN products p ON p.supplier_id = s.id ORDER BY s.name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("failed to list suppliers", e))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("name")
                    .map_err(|e| DomainError::internal(e))
            })
            .collect()
    }
}
