//! Catalog list filter.

use serde::Deserialize;

use crate::product::{Product, optional_text};

/// Optional filters for listing products.
///
/// `category`, `subcategory` and `brand` are exact matches; `search` is a
/// case-insensitive substring match on name or brand. Empty strings mean
/// "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
}

impl ProductFilter {
    /// Drop blank values so they do not constrain the query.
    pub fn normalized(self) -> Self {
        Self {
            search: optional_text(self.search),
            category: optional_text(self.category),
            subcategory: optional_text(self.subcategory),
            brand: optional_text(self.brand),
        }
    }

    /// In-memory evaluation of the filter, mirroring the SQL the store issues.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&needle);
            let in_brand = product
                .brand
                .as_deref()
                .is_some_and(|b| b.to_lowercase().contains(&needle));
            if !in_name && !in_brand {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }
        if let Some(subcategory) = &self.subcategory {
            if product.subcategory.as_ref() != Some(subcategory) {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if product.brand.as_ref() != Some(brand) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_core::ProductId;

    fn product(name: &str, brand: Option<&str>, category: &str, sub: Option<&str>) -> Product {
        Product {
            id: ProductId::new(1),
            name: name.to_string(),
            brand: brand.map(str::to_string),
            category: category.to_string(),
            subcategory: sub.map(str::to_string),
            price: 1.0,
            quantity: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn blank_values_are_dropped() {
        let f = ProductFilter {
            search: Some("  ".to_string()),
            category: Some(String::new()),
            subcategory: None,
            brand: Some("Dell".to_string()),
        }
        .normalized();
        assert_eq!(f.search, None);
        assert_eq!(f.category, None);
        assert_eq!(f.brand.as_deref(), Some("Dell"));
        assert_eq!(ProductFilter::default().normalized(), ProductFilter::default());
    }

    #[test]
    fn search_matches_name_or_brand_case_insensitively() {
        let mouse = product("Wireless Mouse", Some("Logitech"), "Electronics", Some("Peripherals"));
        let by_name = ProductFilter { search: Some("mouse".into()), ..Default::default() };
        let by_brand = ProductFilter { search: Some("LOGI".into()), ..Default::default() };
        let miss = ProductFilter { search: Some("chair".into()), ..Default::default() };
        assert!(by_name.matches(&mouse));
        assert!(by_brand.matches(&mouse));
        assert!(!miss.matches(&mouse));
    }

    #[test]
    fn equality_filters_are_exact() {
        let lamp = product("Desk Lamp", Some("IKEA"), "Furniture", Some("Lighting"));
        let ok = ProductFilter {
            category: Some("Furniture".into()),
            subcategory: Some("Lighting".into()),
            brand: Some("IKEA".into()),
            ..Default::default()
        };
        assert!(ok.matches(&lamp));

        let wrong_sub = ProductFilter { subcategory: Some("Seating".into()), ..Default::default() };
        assert!(!wrong_sub.matches(&lamp));

        let no_brand = product("Desk Lamp", None, "Furniture", None);
        let brand_filter = ProductFilter { brand: Some("IKEA".into()), ..Default::default() };
        assert!(!brand_filter.matches(&no_brand));
    }
}
