use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ProductId};

/// Largest on-hand quantity a product may hold.
///
/// Keeps per-category and catalog-wide `SUM(quantity)` inside SQLite's 64-bit
/// integer range.
pub const MAX_QUANTITY: i64 = i32::MAX as i64;

/// A catalog item with price and on-hand quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: Option<String>,
    pub category: String,
    pub subcategory: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Inventory value of this line (`price * quantity`).
    pub fn stock_value(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Raw, unvalidated product fields as they arrive from a client.
///
/// Every field is optional so that missing values surface as a
/// `DomainError::Validation` rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductInput {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
}

/// Validated fields for inserting a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub brand: Option<String>,
    pub category: String,
    pub subcategory: Option<String>,
    pub price: f64,
    pub quantity: i64,
}

/// Validated fields for overwriting a product's descriptive data.
///
/// Quantity is deliberately absent: stock only moves through the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: String,
    pub brand: Option<String>,
    pub category: String,
    pub subcategory: Option<String>,
    pub price: f64,
}

impl ProductInput {
    /// Validate input for `create`. Quantity defaults to 0.
    pub fn into_new_product(self) -> DomainResult<NewProduct> {
        let quantity = self.quantity.unwrap_or(0);
        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if quantity > MAX_QUANTITY {
            return Err(DomainError::validation(format!(
                "quantity cannot exceed {MAX_QUANTITY}"
            )));
        }
        let changes = self.into_changes()?;
        Ok(NewProduct {
            name: changes.name,
            brand: changes.brand,
            category: changes.category,
            subcategory: changes.subcategory,
            price: changes.price,
            quantity,
        })
    }

    /// Validate input for `update`. Any supplied quantity is ignored.
    pub fn into_changes(self) -> DomainResult<ProductChanges> {
        let name = required_text(self.name, "name")?;
        let category = required_text(self.category, "category")?;
        let price = match self.price {
            Some(p) => p,
            None => return Err(DomainError::validation("price is required")),
        };
        if !price.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if price < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }

        Ok(ProductChanges {
            name,
            brand: optional_text(self.brand),
            category,
            subcategory: optional_text(self.subcategory),
            price,
        })
    }
}

fn required_text(value: Option<String>, field: &str) -> DomainResult<String> {
    optional_text(value).ok_or_else(|| DomainError::validation(format!("{field} is required")))
}

/// Trim and collapse empty strings to `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget_input() -> ProductInput {
        ProductInput {
            name: Some("Widget".to_string()),
            brand: None,
            category: Some("Tools".to_string()),
            subcategory: None,
            price: Some(5.0),
            quantity: Some(3),
        }
    }

    #[test]
    fn valid_input_produces_new_product() {
        let p = widget_input().into_new_product().unwrap();
        assert_eq!(p.name, "Widget");
        assert_eq!(p.category, "Tools");
        assert_eq!(p.price, 5.0);
        assert_eq!(p.quantity, 3);
        assert_eq!(p.brand, None);
    }

    #[test]
    fn quantity_defaults_to_zero() {
        let input = ProductInput {
            quantity: None,
            ..widget_input()
        };
        assert_eq!(input.into_new_product().unwrap().quantity, 0);
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        for input in [
            ProductInput { name: None, ..widget_input() },
            ProductInput { name: Some("   ".to_string()), ..widget_input() },
            ProductInput { category: None, ..widget_input() },
            ProductInput { price: None, ..widget_input() },
        ] {
            match input.into_new_product() {
                Err(DomainError::Validation(_)) => {}
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn negative_price_and_quantity_are_rejected() {
        let neg_price = ProductInput { price: Some(-0.01), ..widget_input() };
        assert!(matches!(neg_price.into_new_product(), Err(DomainError::Validation(_))));

        let neg_qty = ProductInput { quantity: Some(-1), ..widget_input() };
        assert!(matches!(neg_qty.into_new_product(), Err(DomainError::Validation(_))));

        let nan = ProductInput { price: Some(f64::NAN), ..widget_input() };
        assert!(matches!(nan.into_changes(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn quantity_is_capped() {
        let at_cap = ProductInput { quantity: Some(MAX_QUANTITY), ..widget_input() };
        assert_eq!(at_cap.into_new_product().unwrap().quantity, MAX_QUANTITY);

        for qty in [MAX_QUANTITY + 1, i64::MAX] {
            let over = ProductInput { quantity: Some(qty), ..widget_input() };
            assert!(matches!(over.into_new_product(), Err(DomainError::Validation(_))), "qty {qty}");
        }
    }

    #[test]
    fn zero_price_is_allowed() {
        let free = ProductInput { price: Some(0.0), ..widget_input() };
        assert_eq!(free.into_new_product().unwrap().price, 0.0);
    }

    #[test]
    fn empty_optional_text_normalizes_to_none() {
        let input = ProductInput {
            brand: Some(String::new()),
            subcategory: Some("  Hand Tools ".to_string()),
            ..widget_input()
        };
        let changes = input.into_changes().unwrap();
        assert_eq!(changes.brand, None);
        assert_eq!(changes.subcategory.as_deref(), Some("Hand Tools"));
    }

    #[test]
    fn input_deserializes_with_missing_fields() {
        let input: ProductInput = serde_json::from_str(r#"{"name":"Widget"}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("Widget"));
        assert!(input.price.is_none());
    }

    #[test]
    fn stock_value_multiplies_price_by_quantity() {
        let p = Product {
            id: ProductId::new(1),
            name: "Widget".to_string(),
            brand: None,
            category: "Tools".to_string(),
            subcategory: None,
            price: 2.5,
            quantity: 4,
            created_at: Utc::now(),
        };
        assert_eq!(p.stock_value(), 10.0);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any non-blank name/category with non-negative price validates,
            /// and the validated fields are the trimmed input.
            #[test]
            fn valid_inputs_round_trip_fields(
                name in "[A-Za-z][A-Za-z0-9 ]{0,40}",
                category in "[A-Za-z][A-Za-z ]{0,20}",
                price in 0.0f64..100_000.0,
                quantity in 0i64..1_000_000,
            ) {
                let input = ProductInput {
                    name: Some(name.clone()),
                    brand: None,
                    category: Some(category.clone()),
                    subcategory: None,
                    price: Some(price),
                    quantity: Some(quantity),
                };
                let p = input.into_new_product().unwrap();
                prop_assert_eq!(p.name, name.trim());
                prop_assert_eq!(p.category, category.trim());
                prop_assert_eq!(p.price, price);
                prop_assert_eq!(p.quantity, quantity);
            }

            /// Property: negative prices never validate.
            #[test]
            fn negative_prices_never_validate(price in -100_000.0f64..-0.0001) {
                let input = ProductInput {
                    name: Some("Widget".to_string()),
                    category: Some("Tools".to_string()),
                    price: Some(price),
                    ..ProductInput::default()
                };
                prop_assert!(input.into_changes().is_err());
            }
        }
    }
}
