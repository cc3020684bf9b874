//! Catalog API: category and product REST backend library.

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use error::{ApiError, ApiResult};
pub use routes::{api_router, category_routes, common_routes_with_ready, product_routes};
pub use state::AppState;
pub use store::{ensure_catalog_tables, ensure_database_exists};
