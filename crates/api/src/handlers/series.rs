//! Handlers for the `/series` resource. Catalog reads are public.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use amiibox_db::repositories::SeriesRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/series
///
/// List all series in insertion order. Always succeeds (empty list if
/// none). No identity required.
pub async fn list_series(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let series = SeriesRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: series }))
}
