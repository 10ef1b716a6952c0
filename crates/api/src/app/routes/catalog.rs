use axum::{
    Json,
    extract::{Extension, Query, rejection::QueryRejection},
    response::IntoResponse,
};

use stockroom_infra::InventoryStore;

use crate::app::dto::SubcategoryQuery;
use crate::app::errors::ApiError;

pub async fn categories(
    Extension(store): Extension<InventoryStore>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(store.categories().await?))
}

pub async fn subcategories(
    Extension(store): Extension<InventoryStore>,
    query: Result<Query<SubcategoryQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    Ok(Json(store.subcategories(query.category.as_deref()).await?))
}

pub async fn brands(
    Extension(store): Extension<InventoryStore>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(store.brands().await?))
}
