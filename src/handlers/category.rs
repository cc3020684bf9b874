//! Category handlers: list, create, update, delete.
//!
//! Create and update share the same name-uniqueness check. The check is a
//! plain EXISTS query and does not exclude the row being updated, so
//! renaming a category to a name any row already holds conflicts. The
//! check-then-insert pair is not wrapped in a transaction; the UNIQUE
//! constraint on `category.name` is what holds the invariant under
//! concurrent creates.

use crate::error::ApiError;
use crate::handlers::{body_object, parse_id};
use crate::models::Category;
use crate::service::check_required_fields;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};
use sqlx::PgPool;

fn required_name(body: &Map<String, Value>) -> Result<String, ApiError> {
    if let Some(missing) = check_required_fields(&["name"], body) {
        return Err(ApiError::Validation(missing.error));
    }
    body.get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ApiError::Validation("name must be a string".into()))
}

async fn name_taken(pool: &PgPool, name: &str) -> Result<bool, ApiError> {
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT * FROM category WHERE name = $1)")
            .bind(name)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let rows = sqlx::query_as::<_, Category>("SELECT * FROM category")
        .fetch_all(&state.pool)
        .await?;
    Ok((StatusCode::OK, Json(rows)))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let body = body_object(body)?;
    let name = required_name(&body)?;

    if name_taken(&state.pool, &name).await? {
        return Err(ApiError::Conflict(format!("Category {} already exists", name)));
    }

    let row = sqlx::query_as::<_, Category>("INSERT INTO category(name) VALUES($1) RETURNING *")
        .bind(&name)
        .fetch_one(&state.pool)
        .await?;
    tracing::debug!(id = row.id, name = %row.name, "category created");
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let id = parse_id(&id_str)?;
    let body = body_object(body)?;
    let name = required_name(&body)?;

    if name_taken(&state.pool, &name).await? {
        return Err(ApiError::Conflict(format!("Category {} already exists", name)));
    }

    let row = sqlx::query_as::<_, Category>(
        "UPDATE category SET name = $1, updated_date = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *",
    )
    .bind(&name)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::NotFound("Category not found".into()))?;
    Ok((StatusCode::OK, Json(row)))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let id = parse_id(&id_str)?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM product WHERE category_id = $1")
        .bind(id)
        .fetch_one(&state.pool)
        .await?;
    if count > 0 {
        return Err(ApiError::Conflict(format!(
            "Category is being used by {} products",
            count
        )));
    }

    let result = sqlx::query("DELETE FROM category WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Category not found".into()));
    }
    tracing::debug!(id, "category deleted");
    Ok(StatusCode::NO_CONTENT)
}
