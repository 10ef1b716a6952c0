use axum::{
    Json,
    extract::Extension,
    http::header,
    response::IntoResponse,
};

use stockroom_infra::InventoryStore;

use crate::app::errors::ApiError;

pub async fn summary(
    Extension(store): Extension<InventoryStore>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(store.summary_report().await?))
}

/// CSV download with a timestamped attachment filename.
pub async fn export_csv(
    Extension(store): Extension<InventoryStore>,
) -> Result<impl IntoResponse, ApiError> {
    let export = store.export_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", export.filename),
            ),
        ],
        export.body,
    ))
}
