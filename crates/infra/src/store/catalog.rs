//! Product catalog operations.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use stockroom_core::{DomainError, ProductId};
use stockroom_products::{Product, ProductFilter, ProductInput};

use super::{InventoryStore, PRODUCT_COLUMNS, product_from_row};
use crate::error::StoreResult;

impl InventoryStore {
    /// Products matching `filter`, ordered by brand, category, subcategory, name.
    pub async fn list(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>> {
        let mut conn = self.pool().acquire().await?;
        fetch_products(&mut conn, filter).await
    }

    pub async fn get(&self, id: ProductId) -> StoreResult<Product> {
        let row = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"))
            .bind(id.get())
            .fetch_optional(self.pool())
            .await?;

        match row {
            Some(row) => Ok(product_from_row(&row)?),
            None => Err(DomainError::not_found().into()),
        }
    }

    /// Insert a product. Fails with `Validation` when name, category or price
    /// is missing; quantity defaults to 0.
    pub async fn create(&self, input: ProductInput) -> StoreResult<Product> {
        let new = input.into_new_product()?;
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, brand, category, subcategory, price, quantity, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&new.name)
        .bind(&new.brand)
        .bind(&new.category)
        .bind(&new.subcategory)
        .bind(new.price)
        .bind(new.quantity)
        .bind(created_at)
        .execute(self.pool())
        .await?;

        let id = ProductId::new(result.last_insert_rowid());
        tracing::info!(product_id = %id, name = %new.name, quantity = new.quantity, "product created");

        Ok(Product {
            id,
            name: new.name,
            brand: new.brand,
            category: new.category,
            subcategory: new.subcategory,
            price: new.price,
            quantity: new.quantity,
            created_at,
        })
    }

    /// Overwrite name, brand, category, subcategory and price.
    ///
    /// Quantity is untouched. An unknown id is a silent no-op; the return value
    /// reports whether a row was changed.
    pub async fn update(&self, id: ProductId, input: ProductInput) -> StoreResult<bool> {
        let changes = input.into_changes()?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?1, brand = ?2, category = ?3, subcategory = ?4, price = ?5
            WHERE id = ?6
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.brand)
        .bind(&changes.category)
        .bind(&changes.subcategory)
        .bind(changes.price)
        .bind(id.get())
        .execute(self.pool())
        .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            tracing::info!(product_id = %id, "product updated");
        } else {
            tracing::debug!(product_id = %id, "update matched no product");
        }
        Ok(updated)
    }

    /// Remove a product together with its ledger entries. Returns whether a
    /// product existed.
    pub async fn delete(&self, id: ProductId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id.get())
            .execute(self.pool())
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(product_id = %id, "product deleted");
        }
        Ok(deleted)
    }

    pub async fn categories(&self) -> StoreResult<Vec<String>> {
        let values = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM products \
             WHERE category IS NOT NULL AND category != '' ORDER BY category",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(values)
    }

    /// Distinct subcategories, optionally restricted to one category.
    pub async fn subcategories(&self, category: Option<&str>) -> StoreResult<Vec<String>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT DISTINCT subcategory FROM products \
             WHERE subcategory IS NOT NULL AND subcategory != ''",
        );
        if let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) {
            qb.push(" AND category = ").push_bind(category.to_string());
        }
        qb.push(" ORDER BY subcategory");

        let values = qb.build_query_scalar::<String>().fetch_all(self.pool()).await?;
        Ok(values)
    }

    pub async fn brands(&self) -> StoreResult<Vec<String>> {
        let values = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT brand FROM products \
             WHERE brand IS NOT NULL AND brand != '' ORDER BY brand",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(values)
    }
}

/// Filtered catalog query on an already-acquired connection.
pub(super) async fn fetch_products(
    conn: &mut SqliteConnection,
    filter: &ProductFilter,
) -> StoreResult<Vec<Product>> {
    let filter = filter.clone().normalized();

    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE 1=1"));

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        qb.push(" AND (name LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR brand LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
    if let Some(category) = filter.category {
        qb.push(" AND category = ").push_bind(category);
    }
    if let Some(subcategory) = filter.subcategory {
        qb.push(" AND subcategory = ").push_bind(subcategory);
    }
    if let Some(brand) = filter.brand {
        qb.push(" AND brand = ").push_bind(brand);
    }
    qb.push(" ORDER BY brand, category, subcategory, name, id");

    let rows = qb.build().fetch_all(conn).await?;
    let products = rows
        .iter()
        .map(product_from_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(products)
}

/// `%needle%` with LIKE wildcards in the needle escaped.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_inventory::StockMovement;

    use crate::error::StoreError;
    use crate::store::test_support::{create, input, store};

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("abc"), "%abc%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[tokio::test]
    async fn created_product_is_listed_with_identical_fields() {
        let store = store().await;
        let created = store
            .create(ProductInput {
                brand: Some("Acme".to_string()),
                subcategory: Some("Hand Tools".to_string()),
                ..input("Widget", "Tools", 5.0, None)
            })
            .await
            .unwrap();
        assert_eq!(created.quantity, 0);

        let listed = store.list(&ProductFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        let p = &listed[0];
        assert_eq!(p.id, created.id);
        assert_eq!(p.name, "Widget");
        assert_eq!(p.brand.as_deref(), Some("Acme"));
        assert_eq!(p.category, "Tools");
        assert_eq!(p.subcategory.as_deref(), Some("Hand Tools"));
        assert_eq!(p.price, 5.0);
        assert_eq!(p.quantity, 0);
        assert_eq!(p.created_at, created.created_at);
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let store = store().await;
        let err = store
            .create(ProductInput { price: None, ..input("Widget", "Tools", 1.0, None) })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Domain(DomainError::Validation(_))));
        assert!(store.list(&ProductFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_applies_filters_and_ordering() {
        let store = store().await;
        for (name, brand, category, sub) in [
            ("Wireless Mouse", "Logitech", "Electronics", "Peripherals"),
            ("Desk Lamp", "IKEA", "Furniture", "Lighting"),
            ("Webcam", "Logitech", "Electronics", "Peripherals"),
            ("Headphones", "Sony", "Electronics", "Audio"),
        ] {
            store
                .create(ProductInput {
                    brand: Some(brand.to_string()),
                    subcategory: Some(sub.to_string()),
                    ..input(name, category, 10.0, Some(1))
                })
                .await
                .unwrap();
        }

        let all = store.list(&ProductFilter::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Desk Lamp", "Webcam", "Wireless Mouse", "Headphones"]);

        let filters = [
            ProductFilter { search: Some("logi".into()), ..Default::default() },
            ProductFilter { search: Some("lamp".into()), ..Default::default() },
            ProductFilter { category: Some("Electronics".into()), ..Default::default() },
            ProductFilter {
                category: Some("Electronics".into()),
                subcategory: Some("Peripherals".into()),
                ..Default::default()
            },
            ProductFilter { brand: Some("Sony".into()), ..Default::default() },
            ProductFilter { search: Some("%".into()), ..Default::default() },
        ];
        for filter in filters {
            let got = store.list(&filter).await.unwrap();
            let expected: Vec<_> = all.iter().filter(|p| filter.matches(p)).cloned().collect();
            assert_eq!(got, expected, "filter {filter:?}");
        }
    }

    #[tokio::test]
    async fn update_overwrites_fields_but_not_quantity() {
        let store = store().await;
        let p = create(&store, "Widget", 7).await;

        let changed = store
            .update(
                p.id,
                ProductInput {
                    brand: Some("Acme".to_string()),
                    quantity: Some(999),
                    ..input("Widget Pro", "Hardware", 12.5, None)
                },
            )
            .await
            .unwrap();
        assert!(changed);

        let after = store.get(p.id).await.unwrap();
        assert_eq!(after.name, "Widget Pro");
        assert_eq!(after.category, "Hardware");
        assert_eq!(after.brand.as_deref(), Some("Acme"));
        assert_eq!(after.price, 12.5);
        assert_eq!(after.quantity, 7);
    }

    #[tokio::test]
    async fn update_and_delete_of_unknown_id_are_silent() {
        let store = store().await;
        let missing = ProductId::new(404);
        assert!(!store.update(missing, input("X", "Y", 1.0, None)).await.unwrap());
        assert!(!store.delete(missing).await.unwrap());
        assert!(matches!(
            store.get(missing).await,
            Err(StoreError::Domain(DomainError::NotFound))
        ));
    }

    #[tokio::test]
    async fn delete_removes_product_and_its_ledger() {
        let store = store().await;
        let p = create(&store, "Widget", 1).await;
        let keep = create(&store, "Gadget", 1).await;
        for id in [p.id, keep.id] {
            store
                .stock_in(StockMovement::new(id, 2, None).unwrap())
                .await
                .unwrap();
        }

        assert!(store.delete(p.id).await.unwrap());
        let listed = store.list(&ProductFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, keep.id);

        for (id, expected) in [(p.id, 0), (keep.id, 1)] {
            let rows: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM stock_transactions WHERE product_id = ?1",
            )
            .bind(id.get())
            .fetch_one(store.pool())
            .await
            .unwrap();
            assert_eq!(rows, expected, "product {id}");
        }
    }

    #[tokio::test]
    async fn distinct_lookups_skip_blank_values() {
        let store = store().await;
        store
            .create(ProductInput {
                brand: Some("Dell".to_string()),
                subcategory: Some("Computers".to_string()),
                ..input("Laptop", "Electronics", 900.0, None)
            })
            .await
            .unwrap();
        store
            .create(ProductInput {
                brand: Some(String::new()),
                subcategory: Some("Seating".to_string()),
                ..input("Chair", "Furniture", 200.0, None)
            })
            .await
            .unwrap();
        store.create(input("Stool", "Furniture", 50.0, None)).await.unwrap();

        assert_eq!(store.categories().await.unwrap(), vec!["Electronics", "Furniture"]);
        assert_eq!(store.brands().await.unwrap(), vec!["Dell"]);
        assert_eq!(
            store.subcategories(None).await.unwrap(),
            vec!["Computers", "Seating"]
        );
        assert_eq!(
            store.subcategories(Some("Furniture")).await.unwrap(),
            vec!["Seating"]
        );
        assert_eq!(store.subcategories(Some(" ")).await.unwrap().len(), 2);
    }
}
