//! Repository for the `figures` table.
//!
//! Every read embeds the resolved series. Check-then-write sequences run
//! inside a single transaction so no concurrent request can observe a
//! torn state (e.g. a figure referencing a just-deleted series, or a
//! half-cascaded delete).

use sqlx::{PgPool, Postgres, Transaction};

use amiibox_core::types::DbId;

use crate::error::DbError;
use crate::models::figure::{CreateFigure, Figure, FigureSeriesRow, FigureWithSeries, UpdateFigure};
use crate::models::series::Series;

/// Column list for queries joining figures with their series.
const JOIN_COLUMNS: &str = "f.id, f.name, f.image, f.series_id, \
    s.name AS series_name, s.created_at AS series_created_at, \
    f.created_at, f.updated_at";

/// Column list for bare figure rows.
const COLUMNS: &str = "id, name, image, series_id, created_at, updated_at";

/// Provides CRUD operations for figures with referential-integrity
/// enforcement and cascade-on-delete for association rows.
pub struct FigureRepo;

impl FigureRepo {
    /// List all figures with embedded series, in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<FigureWithSeries>, DbError> {
        let query = format!(
            "SELECT {JOIN_COLUMNS} FROM figures f
             JOIN series s ON s.id = f.series_id
             ORDER BY f.id"
        );
        let rows = sqlx::query_as::<_, FigureSeriesRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(FigureWithSeries::from).collect())
    }

    /// Find a figure by its primary key, with embedded series.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FigureWithSeries>, DbError> {
        let query = format!(
            "SELECT {JOIN_COLUMNS} FROM figures f
             JOIN series s ON s.id = f.series_id
             WHERE f.id = $1"
        );
        let row = sqlx::query_as::<_, FigureSeriesRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(FigureWithSeries::from))
    }

    /// Insert a new figure, returning the created row with its series.
    ///
    /// The series reference is resolved in the same transaction as the
    /// insert; a missing series yields [`DbError::ForeignKey`] and no row
    /// is written.
    pub async fn create(pool: &PgPool, input: &CreateFigure) -> Result<FigureWithSeries, DbError> {
        let mut tx = pool.begin().await?;

        let series = Self::resolve_series(&mut tx, input.series_id).await?;

        let query = format!(
            "INSERT INTO figures (name, image, series_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let figure = sqlx::query_as::<_, Figure>(&query)
            .bind(&input.name)
            .bind(&input.image)
            .bind(input.series_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(embed(figure, series))
    }

    /// Update a figure. Only non-`None` fields in `input` are applied.
    ///
    /// A supplied `series_id` must resolve to an existing series. Returns
    /// [`DbError::NotFound`] if no figure with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFigure,
    ) -> Result<FigureWithSeries, DbError> {
        let mut tx = pool.begin().await?;

        if let Some(series_id) = input.series_id {
            Self::resolve_series(&mut tx, series_id).await?;
        }

        let query = format!(
            "UPDATE figures SET
                name = COALESCE($2, name),
                image = COALESCE($3, image),
                series_id = COALESCE($4, series_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let figure = sqlx::query_as::<_, Figure>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.image)
            .bind(input.series_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::NotFound {
                entity: "Figure",
                id,
            })?;

        // Always present: series_id is a foreign key.
        let series = Self::resolve_series(&mut tx, figure.series_id).await?;

        tx.commit().await?;

        Ok(embed(figure, series))
    }

    /// Delete a figure and every ownership/wishlist row referencing it,
    /// in one transaction (all-or-nothing).
    ///
    /// Returns [`DbError::NotFound`] if the figure does not exist; a
    /// concurrent delete of the same figure resolves the same way for
    /// the loser, never as a half-cascaded state.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), DbError> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM ownership_links WHERE figure_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM wishlist_links WHERE figure_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM figures WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity: "Figure",
                id,
            });
        }

        tx.commit().await?;
        Ok(())
    }

    /// Count figure rows.
    pub async fn count(pool: &PgPool) -> Result<i64, DbError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM figures")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Fetch the series row inside the current transaction, or fail with
    /// [`DbError::ForeignKey`] when it does not exist.
    async fn resolve_series(
        tx: &mut Transaction<'_, Postgres>,
        series_id: DbId,
    ) -> Result<Series, DbError> {
        sqlx::query_as::<_, Series>("SELECT id, name, created_at FROM series WHERE id = $1")
            .bind(series_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(DbError::ForeignKey {
                entity: "Series",
                id: series_id,
            })
    }
}

fn embed(figure: Figure, series: Series) -> FigureWithSeries {
    FigureWithSeries {
        id: figure.id,
        name: figure.name,
        image: figure.image,
        series,
        created_at: figure.created_at,
        updated_at: figure.updated_at,
    }
}
