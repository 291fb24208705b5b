//! Catalog browsing value objects: sort options, facet checkboxes and the
//! assembled catalog page.

use serde::{Deserialize, Serialize};

use ss_shared::types::PaginatedResponse;

use crate::domain::entities::product::Product;

/// Sort options for the product grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    SupplierAsc,
    SupplierDesc,
}

impl Default for ProductSort {
    fn default() -> Self {
        ProductSort::NameAsc
    }
}

/// A facet checkbox: a product type or supplier name plus whether the
/// current query has it selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub name: String,
    pub checked: bool,
}

impl FacetOption {
    /// Builds the option list for a facet, marking entries present in the
    /// selection as checked
    pub fn from_values(values: Vec<String>, selected: &[String]) -> Vec<FacetOption> {
        values
            .into_iter()
            .map(|name| FacetOption {
                checked: selected.contains(&name),
                name,
            })
            .collect()
    }
}

/// Filtering criteria for a catalog search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Free-text search over product names
    pub search: Option<String>,

    /// Selected product-type facets; empty means all types
    pub product_types: Vec<String>,

    /// Selected supplier facets; empty means all suppliers
    pub supplier_names: Vec<String>,
}

/// A full catalog query as submitted by the storefront
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub filter: CatalogFilter,
    pub sort: ProductSort,

    /// Requested page (1-indexed). A page beyond the final page of the
    /// filtered result resets to the first page.
    pub page: u32,
}

/// A product joined with its supplier's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    #[serde(flatten)]
    pub product: Product,
    pub supplier_name: String,
}

/// Everything the storefront needs to render the product grid
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub products: PaginatedResponse<CatalogProduct>,
    pub type_options: Vec<FacetOption>,
    pub supplier_options: Vec<FacetOption>,
    pub sort: ProductSort,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_options_mark_selection() {
        let options = FacetOption::from_values(
            vec!["Drinks".to_string(), "Snacks".to_string()],
            &["Snacks".to_string()],
        );

        assert_eq!(options.len(), 2);
        assert!(!options[0].checked);
        assert!(options[1].checked);
    }

    #[test]
    fn test_default_sort_is_name_ascending() {
        assert_eq!(ProductSort::default(), ProductSort::NameAsc);
    }

    #[test]
    fn test_sort_serialization() {
        let json = serde_json::to_string(&ProductSort::PriceDesc).unwrap();
        assert_eq!(json, "\"price_desc\"");
    }
}
