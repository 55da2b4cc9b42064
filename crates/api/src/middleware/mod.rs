//! Authentication middleware extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the JWT Bearer token to an enabled
//!   user row, or rejects with 401.

pub mod auth;
