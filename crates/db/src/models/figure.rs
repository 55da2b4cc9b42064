//! Figure entity model and DTOs.

use amiibox_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::series::Series;

/// Full figure row from the `figures` table.
#[derive(Debug, Clone, FromRow)]
pub struct Figure {
    pub id: DbId,
    pub name: String,
    pub image: String,
    pub series_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Figure with its series embedded, per the read contract: consumers get
/// the resolved series, not just its foreign key.
#[derive(Debug, Clone, Serialize)]
pub struct FigureWithSeries {
    pub id: DbId,
    pub name: String,
    pub image: String,
    pub series: Series,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Flat join row produced by figure queries that embed the series.
#[derive(Debug, FromRow)]
pub(crate) struct FigureSeriesRow {
    pub id: DbId,
    pub name: String,
    pub image: String,
    pub series_id: DbId,
    pub series_name: String,
    pub series_created_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<FigureSeriesRow> for FigureWithSeries {
    fn from(row: FigureSeriesRow) -> Self {
        FigureWithSeries {
            id: row.id,
            name: row.name,
            image: row.image,
            series: Series {
                id: row.series_id,
                name: row.series_name,
                created_at: row.series_created_at,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new figure.
#[derive(Debug, Deserialize)]
pub struct CreateFigure {
    pub name: String,
    pub image: String,
    pub series_id: DbId,
}

/// DTO for updating an existing figure. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateFigure {
    pub name: Option<String>,
    pub image: Option<String>,
    pub series_id: Option<DbId>,
}
