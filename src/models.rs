//! Row types for the two catalog entities. Field names match column names
//! so rows serialize straight into response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

/// The `{id, name}` sub-object embedded in product reads.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct CategoryRef {
    pub id: i32,
    pub name: String,
}

/// Full product row, as returned by `INSERT`/`UPDATE ... RETURNING *`.
/// Create and update responses use this shape; it carries `category_id` but
/// no embedded category object.
#[derive(Debug, Serialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub quantity: i32,
    /// Nullable: update writes the payload's value as-is, and a payload
    /// without `active` writes NULL.
    pub active: Option<bool>,
    pub category_id: i32,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

/// Product read shape: list/get responses replace the bare `category_id`
/// column with an embedded `category: {id, name}` object, null if the
/// referenced row is gone.
#[derive(Debug, Serialize, FromRow)]
pub struct ProductWithCategory {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub quantity: i32,
    pub active: Option<bool>,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    pub category: Option<Json<CategoryRef>>,
}
