//! Handlers for the `/figures` resource.
//!
//! Reads are public; create/update/delete require authentication via
//! [`AuthUser`]. Every figure payload embeds its resolved series.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use amiibox_core::error::CoreError;
use amiibox_core::types::DbId;
use amiibox_db::models::figure::{CreateFigure, UpdateFigure};
use amiibox_db::repositories::FigureRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/figures
///
/// List all figures with embedded series, in insertion order.
pub async fn list_figures(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let figures = FigureRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: figures }))
}

/// GET /api/v1/figures/{id}
///
/// Fetch a single figure with embedded series, or 404.
pub async fn get_figure(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let figure = FigureRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Figure",
            id,
        }))?;

    Ok(Json(DataResponse { data: figure }))
}

/// POST /api/v1/figures
///
/// Create a figure. The series reference must resolve; name and image
/// must be non-empty.
pub async fn create_figure(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateFigure>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    validate_image(&input.image)?;

    let figure = FigureRepo::create(&state.pool, &input).await?;

    tracing::info!(figure_id = figure.id, user_id = auth.user_id, "Figure created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: figure })))
}

/// PATCH /api/v1/figures/{id}
///
/// Partially update a figure. Only supplied fields are applied; a
/// supplied `series_id` must resolve.
pub async fn update_figure(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFigure>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(image) = &input.image {
        validate_image(image)?;
    }

    let figure = FigureRepo::update(&state.pool, id, &input).await?;

    tracing::info!(figure_id = id, user_id = auth.user_id, "Figure updated");

    Ok(Json(DataResponse { data: figure }))
}

/// DELETE /api/v1/figures/{id}
///
/// Delete a figure and every ownership/wishlist row referencing it.
pub async fn delete_figure(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    FigureRepo::delete(&state.pool, id).await?;

    tracing::info!(figure_id = id, user_id = auth.user_id, "Figure deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }
    Ok(())
}

fn validate_image(image: &str) -> AppResult<()> {
    if image.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "image must not be empty".into(),
        )));
    }
    Ok(())
}
