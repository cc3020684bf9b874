pub mod catalog;
pub mod common;

pub use catalog::{category_routes, product_routes};
pub use common::common_routes_with_ready;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application router: health/ready/version plus both resources.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/categories", category_routes(state.clone()))
        .nest("/products", product_routes(state))
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(TraceLayer::new_for_http())
}
