//! Route definitions for the figures resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::figures;
use crate::state::AppState;

/// Figure routes mounted at `/figures`.
///
/// ```text
/// GET    /      -> list_figures (public)
/// POST   /      -> create_figure
/// GET    /{id}  -> get_figure (public)
/// PATCH  /{id}  -> update_figure
/// DELETE /{id}  -> delete_figure
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(figures::list_figures).post(figures::create_figure))
        .route(
            "/{id}",
            get(figures::get_figure)
                .patch(figures::update_figure)
                .delete(figures::delete_figure),
        )
}
