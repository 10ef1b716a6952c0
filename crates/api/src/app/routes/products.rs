use axum::{
    Json,
    extract::{Extension, Path, Query, rejection::{JsonRejection, QueryRejection}},
    http::StatusCode,
    response::IntoResponse,
};

use stockroom_core::ProductId;
use stockroom_infra::InventoryStore;
use stockroom_products::{ProductFilter, ProductInput};

use crate::app::dto::{MessageResponse, ProductCreatedResponse};
use crate::app::errors::ApiError;

fn parse_id(raw: &str) -> Result<ProductId, ApiError> {
    Ok(raw.parse::<ProductId>()?)
}

pub async fn list_products(
    Extension(store): Extension<InventoryStore>,
    filter: Result<Query<ProductFilter>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(filter) = filter?;
    let products = store.list(&filter).await?;
    Ok(Json(products))
}

pub async fn get_product(
    Extension(store): Extension<InventoryStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let product = store.get(parse_id(&id)?).await?;
    Ok(Json(product))
}

pub async fn create_product(
    Extension(store): Extension<InventoryStore>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;
    let product = store.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductCreatedResponse {
            success: true,
            message: "Product added successfully".to_string(),
            product,
        }),
    ))
}

pub async fn update_product(
    Extension(store): Extension<InventoryStore>,
    Path(id): Path<String>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let Json(input) = body?;
    store.update(id, input).await?;
    Ok(Json(MessageResponse::ok("Product updated successfully")))
}

pub async fn delete_product(
    Extension(store): Extension<InventoryStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    store.delete(parse_id(&id)?).await?;
    Ok(Json(MessageResponse::ok("Product deleted successfully")))
}

pub async fn product_history(
    Extension(store): Extension<InventoryStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = store.history(parse_id(&id)?).await?;
    Ok(Json(entries))
}
