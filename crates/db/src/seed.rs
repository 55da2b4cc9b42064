//! Sample-data seeding for local development.
//!
//! Both entry points are idempotent at the dataset level: when the
//! target table already contains rows the seed is skipped entirely, so
//! re-running never duplicates data.

use sqlx::PgPool;

use crate::error::DbError;
use crate::models::series::CreateSeries;
use crate::models::user::CreateUser;
use crate::repositories::{FigureRepo, SeriesRepo, UserRepo};

const IMAGE_BASE: &str = "https://raw.githubusercontent.com/N3evin/AmiiboAPI/master/images";

/// Sample catalog: (series name, [(figure name, image icon id)]).
const CATALOG: &[(&str, &[(&str, &str)])] = &[
    (
        "Super Mario Bros.",
        &[
            ("Mario", "icon_00000000-00000002"),
            ("Luigi", "icon_00000000-00010002"),
            ("Peach", "icon_00000000-00020002"),
            ("Yoshi", "icon_00000000-00030002"),
            ("Bowser", "icon_00000000-01010002"),
        ],
    ),
    (
        "The Legend of Zelda",
        &[
            ("Link", "icon_01000000-00000002"),
            ("Zelda", "icon_01000000-00010002"),
            ("Ganondorf", "icon_01000000-00020002"),
            ("Toon Link", "icon_01000000-00040002"),
            ("Sheik", "icon_01000000-00050002"),
        ],
    ),
    (
        "Animal Crossing",
        &[
            ("Isabelle", "icon_02000000-00000002"),
            ("Tom Nook", "icon_02000000-00010003"),
            ("K.K. Slider", "icon_02000000-00020003"),
        ],
    ),
    (
        "Splatoon",
        &[
            ("Inkling Girl", "icon_10000000-00000000"),
            ("Inkling Boy", "icon_10000000-00010000"),
            ("Inkling Squid", "icon_10000000-00020000"),
        ],
    ),
    (
        "Pokemon",
        &[
            ("Pikachu", "icon_00000000-000a0002"),
            ("Charizard", "icon_00000000-00190002"),
            ("Lucario", "icon_00000000-001a0002"),
            ("Jigglypuff", "icon_00000000-000c0002"),
        ],
    ),
];

/// Sample users: (full name, email).
const USERS: &[(&str, &str)] = &[
    ("John Doe", "john@example.com"),
    ("Jane Smith", "jane@example.com"),
    ("Bob Johnson", "bob@example.com"),
];

/// Seed the sample series and figures. Returns `false` (and writes
/// nothing) when the catalog already contains data.
pub async fn seed_catalog(pool: &PgPool) -> Result<bool, DbError> {
    if SeriesRepo::count(pool).await? > 0 {
        tracing::info!("catalog already contains data, skipping seed");
        return Ok(false);
    }

    let mut figure_count = 0;
    for (series_name, figures) in CATALOG {
        let series = SeriesRepo::create(
            pool,
            &CreateSeries {
                name: (*series_name).to_string(),
            },
        )
        .await?;

        for (name, icon) in *figures {
            FigureRepo::create(
                pool,
                &crate::models::figure::CreateFigure {
                    name: (*name).to_string(),
                    image: format!("{IMAGE_BASE}/{icon}.png"),
                    series_id: series.id,
                },
            )
            .await?;
            figure_count += 1;
        }
    }

    tracing::info!(
        series = CATALOG.len(),
        figures = figure_count,
        "catalog seeded"
    );
    Ok(true)
}

/// Seed the sample users. The caller supplies the (already hashed)
/// password shared by all sample accounts. Returns `false` when users
/// already exist.
pub async fn seed_users(pool: &PgPool, password_hash: &str) -> Result<bool, DbError> {
    if UserRepo::count(pool).await? > 0 {
        tracing::info!("users already exist, skipping user seed");
        return Ok(false);
    }

    for (full_name, email) in USERS {
        UserRepo::create(
            pool,
            &CreateUser {
                full_name: (*full_name).to_string(),
                email: (*email).to_string(),
                password_hash: password_hash.to_string(),
            },
        )
        .await?;
    }

    tracing::info!(users = USERS.len(), "sample users seeded");
    Ok(true)
}
