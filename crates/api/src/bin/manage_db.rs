//! Database management CLI.
//!
//! Usage:
//!
//! ```text
//! manage-db init    # apply migrations
//! manage-db seed    # apply migrations, then insert catalog + demo users
//! manage-db stats   # print row counts per table
//! ```
//!
//! Requires `DATABASE_URL`. The demo user password comes from
//! `SEED_USER_PASSWORD` (defaults to "changeme123").

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use amiibox_api::auth::password::hash_password;
use amiibox_db::repositories::{FigureRepo, SeriesRepo, UserRepo};
use amiibox_db::seed::{seed_catalog, seed_users};

const USAGE: &str = "usage: manage-db <init|seed|stats>";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "manage_db=info,amiibox_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let command = match std::env::args().nth(1) {
        Some(c) => c,
        None => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = amiibox_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    match command.as_str() {
        "init" => {
            amiibox_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database schema is up to date");
        }
        "seed" => {
            amiibox_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");

            let seeded = seed_catalog(&pool).await.expect("Failed to seed catalog");
            if seeded {
                tracing::info!("Catalog seeded");
            } else {
                tracing::info!("Catalog already present, skipping");
            }

            let password =
                std::env::var("SEED_USER_PASSWORD").unwrap_or_else(|_| "changeme123".into());
            let password_hash = hash_password(&password).expect("Failed to hash seed password");

            let seeded = seed_users(&pool, &password_hash)
                .await
                .expect("Failed to seed users");
            if seeded {
                tracing::info!("Demo users seeded");
            } else {
                tracing::info!("Users already present, skipping");
            }
        }
        "stats" => {
            let series = SeriesRepo::count(&pool).await.expect("Failed to count series");
            let figures = FigureRepo::count(&pool).await.expect("Failed to count figures");
            let users = UserRepo::count(&pool).await.expect("Failed to count users");

            let (owned, wanted): (i64, i64) = sqlx::query_as(
                "SELECT
                    (SELECT COUNT(*) FROM ownership_links),
                    (SELECT COUNT(*) FROM wishlist_links)",
            )
            .fetch_one(&pool)
            .await
            .expect("Failed to count links");

            println!("series:          {series}");
            println!("figures:         {figures}");
            println!("users:           {users}");
            println!("ownership links: {owned}");
            println!("wishlist links:  {wanted}");
        }
        other => {
            eprintln!("unknown command '{other}'\n{USAGE}");
            std::process::exit(2);
        }
    }
}
