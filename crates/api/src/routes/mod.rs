pub mod auth;
pub mod figures;
pub mod health;
pub mod series;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
///
/// /series                              list (public)
///
/// /figures                             list (public), create (auth)
/// /figures/{id}                        get (public), patch, delete (auth)
///
/// /users                               register (public)
/// /users/{id}                          get, patch, delete (auth)
/// /users/{id}/owned                    list (auth)
/// /users/{id}/owned/{figure_id}        put, delete (auth)
/// /users/{id}/wanted                   list (auth)
/// /users/{id}/wanted/{figure_id}       put, delete (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/series", series::router())
        .nest("/figures", figures::router())
        .nest("/users", users::router())
}
