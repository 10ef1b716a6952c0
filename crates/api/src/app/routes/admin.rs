use axum::{Json, extract::Extension, response::IntoResponse};

use stockroom_infra::InventoryStore;

use crate::app::dto::MessageResponse;
use crate::app::errors::ApiError;

pub async fn cleanup_duplicates(
    Extension(store): Extension<InventoryStore>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = store.deduplicate_by_name().await?;
    Ok(Json(MessageResponse::ok(format!(
        "{removed} duplicate products removed"
    ))))
}

pub async fn seed(
    Extension(store): Extension<InventoryStore>,
) -> Result<impl IntoResponse, ApiError> {
    let inserted = store.seed_sample_data().await?;
    Ok(Json(MessageResponse::ok(format!(
        "{inserted} sample products added successfully"
    ))))
}

pub async fn clear_all_products(
    Extension(store): Extension<InventoryStore>,
) -> Result<impl IntoResponse, ApiError> {
    let cleared = store.clear_all().await?;
    Ok(Json(MessageResponse::ok(format!(
        "{} products and {} transactions deleted",
        cleared.products, cleared.transactions
    ))))
}
