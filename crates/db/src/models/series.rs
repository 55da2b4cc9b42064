//! Series entity model.

use amiibox_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full series row from the `series` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Series {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// Input for creating a new series (seed/admin path only).
#[derive(Debug)]
pub struct CreateSeries {
    pub name: String,
}
