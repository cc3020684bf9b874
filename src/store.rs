//! Catalog table DDL and database bootstrap.

use crate::error::ApiError;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Create the `category` and `product` tables if missing. Called once at
/// startup. `product.category_id` carries no foreign-key constraint:
/// referential integrity is checked in the handlers. `product.active` is
/// nullable because a product update writes the payload's `active` value
/// as-is, and a payload without it writes NULL.
pub async fn ensure_catalog_tables(pool: &PgPool) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS category (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS product (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            price DOUBLE PRECISION NOT NULL,
            currency TEXT NOT NULL DEFAULT 'USD',
            quantity INTEGER NOT NULL DEFAULT 0,
            active BOOLEAN DEFAULT TRUE,
            category_id INTEGER NOT NULL,
            created_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Ensure the catalog database named in `database_url` exists; create it if
/// not. CREATE DATABASE cannot run against the target itself, so this
/// connects to the stock `postgres` database on the same host. Call before
/// building the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), ApiError> {
    let target = CatalogDbUrl::parse(database_url)?;
    if target.db_name.is_empty() || target.db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&target.admin_url)
        .map_err(|e| ApiError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(ApiError::Db)?;
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&target.db_name)
            .fetch_one(&mut conn)
            .await
            .map_err(ApiError::Db)?;
    if !exists {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&target.db_name)))
            .execute(&mut conn)
            .await
            .map_err(ApiError::Db)?;
        tracing::info!(database = %target.db_name, "created catalog database");
    }
    Ok(())
}

/// The catalog database name split out of a connection URL, with the sibling
/// admin URL pointing at the stock `postgres` database.
struct CatalogDbUrl {
    admin_url: String,
    db_name: String,
}

impl CatalogDbUrl {
    fn parse(url: &str) -> Result<Self, ApiError> {
        let path_start = url
            .rfind('/')
            .ok_or_else(|| ApiError::BadRequest("DATABASE_URL: no path".into()))?
            + 1;
        let path_and_query = url.get(path_start..).unwrap_or("");
        let db_name = path_and_query.split('?').next().unwrap_or("").trim();
        let base = url.get(..path_start).unwrap_or(url);
        Ok(CatalogDbUrl {
            admin_url: format!("{}postgres", base),
            db_name: db_name.to_string(),
        })
    }
}

/// Quoted identifiers escape embedded double quotes by doubling them.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_name_from_url() {
        let target = CatalogDbUrl::parse("postgres://user:pw@localhost:5432/catalog").unwrap();
        assert_eq!(target.admin_url, "postgres://user:pw@localhost:5432/postgres");
        assert_eq!(target.db_name, "catalog");
    }

    #[test]
    fn db_name_ignores_query_string() {
        let target = CatalogDbUrl::parse("postgres://localhost/catalog?sslmode=disable").unwrap();
        assert_eq!(target.db_name, "catalog");
    }

    #[test]
    fn quote_ident_doubles_embedded_quotes() {
        assert_eq!(quote_ident("catalog"), "\"catalog\"");
        assert_eq!(quote_ident("cat\"alog"), "\"cat\"\"alog\"");
    }
}
