//! Repository for the `series` table.

use sqlx::PgPool;

use amiibox_core::types::DbId;

use crate::error::DbError;
use crate::models::series::{CreateSeries, Series};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at";

/// Read and seed operations for figure series.
///
/// Series are created by catalog seeding/administration only; there is
/// no mutation surface for them beyond that.
pub struct SeriesRepo;

impl SeriesRepo {
    /// Insert a new series, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSeries) -> Result<Series, DbError> {
        let query = format!("INSERT INTO series (name) VALUES ($1) RETURNING {COLUMNS}");
        let series = sqlx::query_as::<_, Series>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await?;
        Ok(series)
    }

    /// Find a series by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Series>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM series WHERE id = $1");
        let series = sqlx::query_as::<_, Series>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(series)
    }

    /// List all series in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Series>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM series ORDER BY id");
        let series = sqlx::query_as::<_, Series>(&query).fetch_all(pool).await?;
        Ok(series)
    }

    /// Count series rows.
    pub async fn count(pool: &PgPool) -> Result<i64, DbError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM series")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
