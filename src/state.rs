//! Shared application state for all routes.

use sqlx::PgPool;

/// Handed to every handler via axum `State`. The pool is the only shared
/// resource; it lives for the whole process and hands out connections per
/// query.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}
