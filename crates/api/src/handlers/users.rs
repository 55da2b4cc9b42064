//! Handlers for the `/users` resource.
//!
//! Registration is public (it is how an identity comes to exist); every
//! other user mutation requires authentication.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use amiibox_core::error::CoreError;
use amiibox_core::types::DbId;
use amiibox_db::models::user::{CreateUser, UpdateUser, UserResponse};
use amiibox_db::repositories::UserRepo;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /users`. The plaintext password is hashed
/// here; it never reaches the repository layer.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// POST /api/v1/users
///
/// Register a new user. A duplicate email yields 409 and leaves the
/// existing row untouched.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    if input.full_name.trim().is_empty() {
        return Err(validation("full_name must not be empty"));
    }
    if input.email.trim().is_empty() || !input.email.contains('@') {
        return Err(validation("email must be a valid address"));
    }
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            full_name: input.full_name,
            email: input.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    let response: UserResponse = user.into();
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /api/v1/users/{id}
///
/// Fetch a user (without the password hash), or 404.
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let response: UserResponse = user.into();
    Ok(Json(DataResponse { data: response }))
}

/// PATCH /api/v1/users/{id}
///
/// Partially update a user. Changing the email to a taken address
/// yields 409.
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    if let Some(full_name) = &input.full_name {
        if full_name.trim().is_empty() {
            return Err(validation("full_name must not be empty"));
        }
    }
    if let Some(email) = &input.email {
        if email.trim().is_empty() || !email.contains('@') {
            return Err(validation("email must be a valid address"));
        }
    }

    let user = UserRepo::update(&state.pool, id, &input).await?;

    tracing::info!(target_user_id = id, user_id = auth.user_id, "User updated");

    let response: UserResponse = user.into();
    Ok(Json(DataResponse { data: response }))
}

/// DELETE /api/v1/users/{id}
///
/// Delete a user and every ownership/wishlist row referencing them.
pub async fn delete_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    UserRepo::delete(&state.pool, id).await?;

    tracing::info!(target_user_id = id, user_id = auth.user_id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn validation(msg: &str) -> AppError {
    AppError::Core(CoreError::Validation(msg.into()))
}
