//! Repository for the `users` table.

use sqlx::PgPool;

use amiibox_core::types::DbId;

use crate::error::{is_unique_violation, DbError};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, email, password_hash, enabled, created_at, updated_at";

/// Named unique constraint on `users.email`, matched when classifying
/// insert/update failures.
const EMAIL_CONSTRAINT: &str = "uq_users_email";

/// Provides CRUD operations for users, with cascade-on-delete for their
/// ownership/wishlist rows.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate email (exact match) yields [`DbError::Conflict`] and
    /// leaves the existing row untouched.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, DbError> {
        let query = format!(
            "INSERT INTO users (full_name, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
            .map_err(classify_email_conflict)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Find a user by email (case-sensitive, exact match).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// List all users in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        let users = sqlx::query_as::<_, User>(&query).fetch_all(pool).await?;
        Ok(users)
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns [`DbError::NotFound`] if no row with the given `id` exists,
    /// [`DbError::Conflict`] when the new email is already taken.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateUser) -> Result<User, DbError> {
        let query = format!(
            "UPDATE users SET
                full_name = COALESCE($2, full_name),
                email = COALESCE($3, email),
                enabled = COALESCE($4, enabled),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(input.enabled)
            .fetch_optional(pool)
            .await
            .map_err(classify_email_conflict)?
            .ok_or(DbError::NotFound { entity: "User", id })
    }

    /// Delete a user and every ownership/wishlist row referencing them,
    /// in one transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), DbError> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM ownership_links WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM wishlist_links WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound { entity: "User", id });
        }

        tx.commit().await?;
        Ok(())
    }

    /// Count user rows.
    pub async fn count(pool: &PgPool) -> Result<i64, DbError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}

fn classify_email_conflict(err: sqlx::Error) -> DbError {
    if is_unique_violation(&err, EMAIL_CONSTRAINT) {
        DbError::Conflict("a user with this email already exists".into())
    } else {
        DbError::Sqlx(err)
    }
}
