//! Apply the embedded Diesel migrations to the configured database.

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use menu_backend::config::database_url_from_env;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// `menu-migrate` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "menu-migrate",
    about = "Apply pending schema migrations to the menu database",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` or the
    /// `DATASOURCE_*` variables when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let database_url = match args.database_url {
        Some(url) => url,
        None => database_url_from_env(&DefaultEnv::new())
            .wrap_err("no --database-url given and environment settings are incomplete")?,
    };

    let mut conn =
        PgConnection::establish(&database_url).wrap_err("failed to connect to the database")?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| eyre!("failed to run migrations: {err}"))?;

    if applied.is_empty() {
        info!("schema already up to date");
    }
    for version in applied {
        info!(%version, "applied migration");
    }
    Ok(())
}
