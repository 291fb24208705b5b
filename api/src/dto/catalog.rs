//! Catalog query parameters.

use serde::Deserialize;

use ss_core::domain::value_objects::catalog::{CatalogFilter, CatalogQuery, ProductSort};

/// Query string of `GET /catalog/products`.
///
/// Facet selections arrive comma-joined (`types=Drinks,Snacks`), the same
/// shape the storefront round-trips between requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQueryParams {
    pub search: Option<String>,
    pub sort: Option<ProductSort>,
    pub types: Option<String>,
    pub suppliers: Option<String>,
    pub page: Option<u32>,
}

fn split_csv(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

impl From<CatalogQueryParams> for CatalogQuery {
    fn from(params: CatalogQueryParams) -> Self {
        CatalogQuery {
            filter: CatalogFilter {
                search: params.search.filter(|s| !s.trim().is_empty()),
                product_types: split_csv(params.types.as_deref()),
                supplier_names: split_csv(params.suppliers.as_deref()),
            },
            sort: params.sort.unwrap_or_default(),
            page: params.page.unwrap_or(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_splitting() {
        let params = CatalogQueryParams {
            types: Some("Drinks, Snacks".to_string()),
            suppliers: Some("".to_string()),
            ..Default::default()
        };

        let query: CatalogQuery = params.into();
        assert_eq!(query.filter.product_types, vec!["Drinks", "Snacks"]);
        assert!(query.filter.supplier_names.is_empty());
    }

    #[test]
    fn test_defaults() {
        let query: CatalogQuery = CatalogQueryParams::default().into();
        assert_eq!(query.page, 1);
        assert_eq!(query.sort, ProductSort::NameAsc);
        assert!(query.filter.search.is_none());
    }

    #[test]
    fn test_blank_search_dropped() {
        let params = CatalogQueryParams {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        let query: CatalogQuery = params.into();
        assert!(query.filter.search.is_none());
    }
}
