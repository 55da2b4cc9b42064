//! Repository for the two user<->figure association tables.
//!
//! `ownership_links` ("owned") and `wishlist_links` ("wanted") are
//! structurally identical but semantically independent: a pair may exist
//! in both at once (owning a figure does not preclude still wanting a
//! duplicate). All set/unset operations are idempotent.

use sqlx::{PgPool, Postgres, Transaction};

use amiibox_core::types::DbId;

use crate::error::DbError;
use crate::models::figure::{FigureSeriesRow, FigureWithSeries};

const OWNED: &str = "ownership_links";
const WANTED: &str = "wishlist_links";

/// Join column list for listing a user's figures through a link table.
const JOIN_COLUMNS: &str = "f.id, f.name, f.image, f.series_id, \
    s.name AS series_name, s.created_at AS series_created_at, \
    f.created_at, f.updated_at";

/// Idempotent set/unset and read operations over the association tables.
pub struct CollectionRepo;

impl CollectionRepo {
    /// Set or unset the "owned" flag for a (user, figure) pair.
    pub async fn set_owned(
        pool: &PgPool,
        user_id: DbId,
        figure_id: DbId,
        owned: bool,
    ) -> Result<(), DbError> {
        Self::set_link(pool, OWNED, user_id, figure_id, owned).await
    }

    /// Set or unset the "wanted" flag for a (user, figure) pair.
    pub async fn set_wanted(
        pool: &PgPool,
        user_id: DbId,
        figure_id: DbId,
        wanted: bool,
    ) -> Result<(), DbError> {
        Self::set_link(pool, WANTED, user_id, figure_id, wanted).await
    }

    /// Whether the user currently owns the figure.
    pub async fn is_owned(pool: &PgPool, user_id: DbId, figure_id: DbId) -> Result<bool, DbError> {
        Self::link_exists(pool, OWNED, user_id, figure_id).await
    }

    /// Whether the user currently wants the figure.
    pub async fn is_wanted(pool: &PgPool, user_id: DbId, figure_id: DbId) -> Result<bool, DbError> {
        Self::link_exists(pool, WANTED, user_id, figure_id).await
    }

    /// List the figures a user owns, with embedded series.
    pub async fn list_owned(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FigureWithSeries>, DbError> {
        Self::list_linked(pool, OWNED, user_id).await
    }

    /// List the figures a user wants, with embedded series.
    pub async fn list_wanted(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FigureWithSeries>, DbError> {
        Self::list_linked(pool, WANTED, user_id).await
    }

    /// Idempotently write one association row.
    ///
    /// Both endpoints of the link must exist; the checks and the write
    /// share one transaction so a concurrent figure/user delete cannot
    /// produce a dangling row. Setting an already-set flag and unsetting
    /// an absent one are both no-op successes.
    async fn set_link(
        pool: &PgPool,
        table: &str,
        user_id: DbId,
        figure_id: DbId,
        present: bool,
    ) -> Result<(), DbError> {
        let mut tx = pool.begin().await?;

        Self::require_row(&mut tx, "users", "User", user_id).await?;
        Self::require_row(&mut tx, "figures", "Figure", figure_id).await?;

        if present {
            let query = format!(
                "INSERT INTO {table} (user_id, figure_id) VALUES ($1, $2)
                 ON CONFLICT (user_id, figure_id) DO NOTHING"
            );
            sqlx::query(&query)
                .bind(user_id)
                .bind(figure_id)
                .execute(&mut *tx)
                .await?;
        } else {
            let query = format!("DELETE FROM {table} WHERE user_id = $1 AND figure_id = $2");
            sqlx::query(&query)
                .bind(user_id)
                .bind(figure_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn link_exists(
        pool: &PgPool,
        table: &str,
        user_id: DbId,
        figure_id: DbId,
    ) -> Result<bool, DbError> {
        let query =
            format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE user_id = $1 AND figure_id = $2)");
        let row: (bool,) = sqlx::query_as(&query)
            .bind(user_id)
            .bind(figure_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    async fn list_linked(
        pool: &PgPool,
        table: &str,
        user_id: DbId,
    ) -> Result<Vec<FigureWithSeries>, DbError> {
        let query = format!(
            "SELECT {JOIN_COLUMNS} FROM {table} l
             JOIN figures f ON f.id = l.figure_id
             JOIN series s ON s.id = f.series_id
             WHERE l.user_id = $1
             ORDER BY f.id"
        );
        let rows = sqlx::query_as::<_, FigureSeriesRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(FigureWithSeries::from).collect())
    }

    /// Assert a referenced row exists within the current transaction.
    async fn require_row(
        tx: &mut Transaction<'_, Postgres>,
        table: &str,
        entity: &'static str,
        id: DbId,
    ) -> Result<(), DbError> {
        let query = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)");
        let row: (bool,) = sqlx::query_as(&query)
            .bind(id)
            .fetch_one(&mut **tx)
            .await?;
        if row.0 {
            Ok(())
        } else {
            Err(DbError::ForeignKey { entity, id })
        }
    }
}
