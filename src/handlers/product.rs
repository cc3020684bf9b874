//! Product handlers: list, get, get-by-category, create, update, delete.
//!
//! Reads embed a `category: {id, name}` object per row via a ROW_TO_JSON
//! scalar subquery. Create and update respond with the bare row (RETURNING *,
//! `category_id` only) — that asymmetry is part of the API contract.

use crate::error::ApiError;
use crate::handlers::{body_object, parse_id};
use crate::models::{Product, ProductWithCategory};
use crate::service::check_required_fields;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};
use sqlx::PgPool;

const PRODUCT_READ_SQL: &str = r#"
    SELECT p.id, p.name, p.description, p.price, p.currency,
        p.quantity, p.active, p.created_date, p.updated_date,
        (SELECT ROW_TO_JSON(category_obj) FROM (
            SELECT id, name FROM category WHERE id = p.category_id
        ) category_obj) AS category
    FROM product p"#;

async fn category_exists(pool: &PgPool, category_id: i32) -> Result<bool, ApiError> {
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT * FROM category WHERE id = $1)")
            .bind(category_id)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

fn required_str(body: &Map<String, Value>, field: &str) -> Result<String, ApiError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ApiError::Validation(format!("{} must be a string", field)))
}

fn required_f64(body: &Map<String, Value>, field: &str) -> Result<f64, ApiError> {
    body.get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| ApiError::Validation(format!("{} must be a number", field)))
}

fn required_i32(body: &Map<String, Value>, field: &str) -> Result<i32, ApiError> {
    body.get(field)
        .and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| ApiError::Validation(format!("{} must be an integer", field)))
}

/// Absent and null both mean "no value"; anything else must be a boolean.
fn optional_bool(body: &Map<String, Value>, field: &str) -> Result<Option<bool>, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ApiError::Validation(format!("{} must be a boolean", field))),
    }
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let rows = sqlx::query_as::<_, ProductWithCategory>(PRODUCT_READ_SQL)
        .fetch_all(&state.pool)
        .await?;
    Ok((StatusCode::OK, Json(rows)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let id = parse_id(&id_str)?;
    let sql = format!("{} WHERE p.id = $1", PRODUCT_READ_SQL);
    let row = sqlx::query_as::<_, ProductWithCategory>(&sql)
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".into()))?;
    Ok((StatusCode::OK, Json(row)))
}

/// 404 when the category itself is absent; an existing category with zero
/// products is a 200 with an empty array.
pub async fn get_products_by_category(
    State(state): State<AppState>,
    Path(category_id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let category_id = parse_id(&category_id_str)?;
    if !category_exists(&state.pool, category_id).await? {
        return Err(ApiError::NotFound(format!("Category {} not found", category_id)));
    }
    let sql = format!("{} WHERE p.category_id = $1", PRODUCT_READ_SQL);
    let rows = sqlx::query_as::<_, ProductWithCategory>(&sql)
        .bind(category_id)
        .fetch_all(&state.pool)
        .await?;
    Ok((StatusCode::OK, Json(rows)))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let body = body_object(body)?;
    if let Some(missing) = check_required_fields(&["name", "price", "category_id"], &body) {
        return Err(ApiError::Validation(missing.error));
    }
    let name = required_str(&body, "name")?;
    let price = required_f64(&body, "price")?;
    let category_id = required_i32(&body, "category_id")?;
    // Optional fields fall back to their defaults on any falsy value.
    let description = body
        .get("description")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    let currency = body
        .get("currency")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("USD");
    let quantity = body
        .get("quantity")
        .and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(0);
    // Keyed on presence, not truthiness, so an explicit `active: false` sticks.
    let active: Option<bool> = if body.contains_key("active") {
        optional_bool(&body, "active")?
    } else {
        Some(true)
    };

    if !category_exists(&state.pool, category_id).await? {
        return Err(ApiError::Validation(format!("Category {} not found", category_id)));
    }

    let row = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO product(name, description, price, currency, quantity, active, category_id)
        VALUES($1, $2, $3, $4, $5, $6, $7) RETURNING *"#,
    )
    .bind(&name)
    .bind(description)
    .bind(price)
    .bind(currency)
    .bind(quantity)
    .bind(active)
    .bind(category_id)
    .fetch_one(&state.pool)
    .await?;
    tracing::debug!(id = row.id, name = %row.name, "product created");
    Ok((StatusCode::CREATED, Json(row)))
}

/// All mutable fields are required except `active`, which is still written:
/// a payload without `active` writes NULL. The falsy required check also
/// means `quantity: 0` or an empty `description` is rejected here even
/// though create accepts their absence.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let id = parse_id(&id_str)?;
    let body = body_object(body)?;
    if let Some(missing) = check_required_fields(
        &["name", "description", "price", "currency", "quantity", "category_id"],
        &body,
    ) {
        return Err(ApiError::Validation(missing.error));
    }
    let name = required_str(&body, "name")?;
    let description = required_str(&body, "description")?;
    let price = required_f64(&body, "price")?;
    let currency = required_str(&body, "currency")?;
    let quantity = required_i32(&body, "quantity")?;
    let category_id = required_i32(&body, "category_id")?;
    let active: Option<bool> = optional_bool(&body, "active")?;

    if !category_exists(&state.pool, category_id).await? {
        return Err(ApiError::Validation(format!("Category {} not found", category_id)));
    }

    let row = sqlx::query_as::<_, Product>(
        r#"
        UPDATE product
        SET name = $1, description = $2, price = $3,
            currency = $4, quantity = $5, active = $6,
            category_id = $7, updated_date = CURRENT_TIMESTAMP
        WHERE id = $8
        RETURNING *"#,
    )
    .bind(&name)
    .bind(&description)
    .bind(price)
    .bind(&currency)
    .bind(quantity)
    .bind(active)
    .bind(category_id)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::NotFound("Product not found".into()))?;
    Ok((StatusCode::OK, Json(row)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let id = parse_id(&id_str)?;
    let result = sqlx::query("DELETE FROM product WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Product not found".into()));
    }
    tracing::debug!(id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}
