//! Route definitions for the series resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::series;
use crate::state::AppState;

/// Series routes mounted at `/series`.
///
/// ```text
/// GET / -> list_series (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(series::list_series))
}
