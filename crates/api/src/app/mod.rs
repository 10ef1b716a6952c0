use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use stockroom_infra::InventoryStore;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full router around an already-connected store.
pub fn build_app(store: InventoryStore) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(store)),
        )
}
