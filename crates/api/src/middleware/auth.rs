//! JWT-based authentication extractor for Axum handlers.
//!
//! The access gate: every mutating endpoint takes an [`AuthUser`]
//! parameter, so the credential is resolved before the repository is
//! ever invoked. A missing, malformed, expired, or unknown credential --
//! and a credential whose user has since been disabled -- all resolve to
//! 401. There is no default or anonymous identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use amiibox_core::error::CoreError;
use amiibox_core::types::DbId;
use amiibox_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated identity extracted from a JWT Bearer token in the
/// `Authorization` header and resolved against the `users` table.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's email, for log context.
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthenticated("Missing Authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            unauthenticated("Invalid Authorization format. Expected: Bearer <token>")
        })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthenticated("Invalid or expired token"))?;

        // The subject must resolve to a live row: a token minted for a
        // since-deleted user is as invalid as a forged one.
        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| unauthenticated("Unknown identity"))?;

        if !user.enabled {
            return Err(unauthenticated("Account is disabled"));
        }

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
        })
    }
}

fn unauthenticated(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthenticated(msg.into()))
}
