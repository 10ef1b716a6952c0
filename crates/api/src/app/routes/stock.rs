use axum::{
    Json,
    extract::{Extension, Query, rejection::{JsonRejection, QueryRejection}},
    response::IntoResponse,
};

use stockroom_core::DomainError;
use stockroom_infra::InventoryStore;
use stockroom_inventory::StockMovementInput;

use crate::app::dto::{AlertsQuery, StockUpdateResponse};
use crate::app::errors::ApiError;

pub async fn stock_in(
    Extension(store): Extension<InventoryStore>,
    body: Result<Json<StockMovementInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;
    let update = store.stock_in(input.validate()?).await?;
    Ok(Json(StockUpdateResponse::new("Stock added successfully", update)))
}

pub async fn stock_out(
    Extension(store): Extension<InventoryStore>,
    body: Result<Json<StockMovementInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;
    let update = store.stock_out(input.validate()?).await?;
    Ok(Json(StockUpdateResponse::new("Stock removed successfully", update)))
}

/// Low-stock products. `?threshold=` overrides the configured threshold.
pub async fn alerts(
    Extension(store): Extension<InventoryStore>,
    query: Result<Query<AlertsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let products = match query.threshold {
        Some(t) if t < 0 => return Err(DomainError::validation("threshold cannot be negative").into()),
        Some(t) => store.low_stock_below(t).await?,
        None => store.low_stock_alerts().await?,
    };
    Ok(Json(products))
}
