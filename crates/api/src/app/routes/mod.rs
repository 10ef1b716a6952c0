use axum::{
    Router,
    routing::{get, post},
};

pub mod admin;
pub mod catalog;
pub mod products;
pub mod reports;
pub mod stock;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .route("/products", get(products::list_products).post(products::create_product))
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/products/:id/transactions", get(products::product_history))
        .route("/stock/in", post(stock::stock_in))
        .route("/stock/out", post(stock::stock_out))
        .route("/alerts", get(stock::alerts))
        .route("/categories", get(catalog::categories))
        .route("/subcategories", get(catalog::subcategories))
        .route("/brands", get(catalog::brands))
        .route("/reports/summary", get(reports::summary))
        .route("/reports/export-csv", get(reports::export_csv))
        .route("/cleanup-duplicates", post(admin::cleanup_duplicates))
        .route("/seed", post(admin::seed))
        .route("/clear-all-products", post(admin::clear_all_products))
}
