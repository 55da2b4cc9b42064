//! Route definitions for the users resource, including the per-user
//! owned/wanted collection endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{collection, users};
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// POST   /                            -> register (public)
/// GET    /{id}                        -> get_user
/// PATCH  /{id}                        -> update_user
/// DELETE /{id}                        -> delete_user
/// GET    /{id}/owned                  -> list_owned
/// PUT    /{id}/owned/{figure_id}      -> set_owned
/// DELETE /{id}/owned/{figure_id}      -> unset_owned
/// GET    /{id}/wanted                 -> list_wanted
/// PUT    /{id}/wanted/{figure_id}     -> set_wanted
/// DELETE /{id}/wanted/{figure_id}     -> unset_wanted
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::register))
        .route(
            "/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/{id}/owned", get(collection::list_owned))
        .route(
            "/{id}/owned/{figure_id}",
            put(collection::set_owned).delete(collection::unset_owned),
        )
        .route("/{id}/wanted", get(collection::list_wanted))
        .route(
            "/{id}/wanted/{figure_id}",
            put(collection::set_wanted).delete(collection::unset_wanted),
        )
}
