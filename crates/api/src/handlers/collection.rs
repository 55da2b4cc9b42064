//! Handlers for the per-user owned/wanted collection endpoints.
//!
//! All endpoints require authentication. Set and unset are idempotent:
//! repeating either is a no-op success, mirroring the repository
//! contract.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use amiibox_core::error::CoreError;
use amiibox_core::types::DbId;
use amiibox_db::repositories::{CollectionRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Owned
// ---------------------------------------------------------------------------

/// GET /api/v1/users/{id}/owned
///
/// List the figures the user owns, with embedded series.
pub async fn list_owned(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_user(&state, user_id).await?;

    let figures = CollectionRepo::list_owned(&state.pool, user_id).await?;

    Ok(Json(DataResponse { data: figures }))
}

/// PUT /api/v1/users/{id}/owned/{figure_id}
pub async fn set_owned(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((user_id, figure_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    CollectionRepo::set_owned(&state.pool, user_id, figure_id, true).await?;

    tracing::info!(
        target_user_id = user_id,
        figure_id,
        user_id = auth.user_id,
        "Figure marked owned"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/{id}/owned/{figure_id}
pub async fn unset_owned(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((user_id, figure_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    CollectionRepo::set_owned(&state.pool, user_id, figure_id, false).await?;

    tracing::info!(
        target_user_id = user_id,
        figure_id,
        user_id = auth.user_id,
        "Figure unmarked owned"
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Wanted
// ---------------------------------------------------------------------------

/// GET /api/v1/users/{id}/wanted
///
/// List the figures the user wants, with embedded series.
pub async fn list_wanted(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_user(&state, user_id).await?;

    let figures = CollectionRepo::list_wanted(&state.pool, user_id).await?;

    Ok(Json(DataResponse { data: figures }))
}

/// PUT /api/v1/users/{id}/wanted/{figure_id}
pub async fn set_wanted(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((user_id, figure_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    CollectionRepo::set_wanted(&state.pool, user_id, figure_id, true).await?;

    tracing::info!(
        target_user_id = user_id,
        figure_id,
        user_id = auth.user_id,
        "Figure marked wanted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/{id}/wanted/{figure_id}
pub async fn unset_wanted(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((user_id, figure_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    CollectionRepo::set_wanted(&state.pool, user_id, figure_id, false).await?;

    tracing::info!(
        target_user_id = user_id,
        figure_id,
        user_id = auth.user_id,
        "Figure unmarked wanted"
    );

    Ok(StatusCode::NO_CONTENT)
}

async fn require_user(state: &AppState, id: DbId) -> AppResult<()> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}
