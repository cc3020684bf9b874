//! Routes for the category and product resources.

use crate::handlers::category::{
    create_category, delete_category, list_categories, update_category,
};
use crate::handlers::product::{
    create_product, delete_product, get_product, get_products_by_category, list_products,
    update_product,
};
use crate::state::AppState;
use axum::{
    routing::{get, put},
    Router,
};

pub fn category_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/:id", put(update_category).delete(delete_category))
        .with_state(state)
}

pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/category/:category_id", get(get_products_by_category))
        .with_state(state)
}
