//! Shared helpers for the Diesel adapter integration suites.
//!
//! Each [`TestDatabase`] owns its own embedded cluster with the embedded
//! migrations applied, a Tokio runtime and a small [`DbPool`]. Tests stay
//! synchronous and drive async calls through [`TestDatabase::block_on`] so the
//! cluster is never dropped from inside a runtime.

#![allow(dead_code, reason = "each suite uses a different subset of helpers")]

pub mod cluster_skip;
pub mod pg_embed;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use menu_backend::outbound::persistence::{DbPool, PoolConfig};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;

pub use cluster_skip::handle_cluster_setup_failure;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
const DATABASE: &str = "postgres";

/// Render a `postgres` error with its SQLSTATE and detail.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

/// A migrated database on a private embedded cluster.
pub struct TestDatabase {
    pub pool: DbPool,
    runtime: Runtime,
    url: String,
    _cluster: TestCluster,
}

impl TestDatabase {
    /// Start a cluster, migrate it and open a pool.
    pub fn start() -> Result<Self, String> {
        let cluster = pg_embed::test_cluster()?;
        let url = cluster.connection().database_url(DATABASE);
        migrate_schema(&url)?;

        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let config = PoolConfig::new(url.clone()).with_max_size(4);
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            pool,
            runtime,
            url,
            _cluster: cluster,
        })
    }

    /// Run `future` to completion on the suite runtime.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        assert!(
            tokio::runtime::Handle::try_current().is_err(),
            "do not call block_on from inside a Tokio runtime"
        );
        self.runtime.block_on(future)
    }

    fn client(&self) -> Client {
        Client::connect(&self.url, NoTls).expect("connect to test database")
    }

    /// Execute raw SQL outside the adapters.
    pub fn execute(&self, sql: &str) {
        self.client()
            .batch_execute(sql)
            .unwrap_or_else(|err| panic!("{sql}: {}", format_postgres_error(&err)));
    }

    /// Run a query whose first column is a `BIGINT`.
    pub fn query_ids(&self, sql: &str) -> Vec<i64> {
        self.client()
            .query(sql, &[])
            .unwrap_or_else(|err| panic!("{sql}: {}", format_postgres_error(&err)))
            .iter()
            .map(|row| row.get::<_, i64>(0))
            .collect()
    }

    /// Count rows returned by `sql`, which must select `COUNT(*)`.
    pub fn count(&self, sql: &str) -> i64 {
        self.query_ids(sql).first().copied().unwrap_or_default()
    }

    /// Insert named genres and return their identifiers in order.
    pub fn insert_genres(&self, names: &[&str]) -> Vec<i64> {
        names
            .iter()
            .flat_map(|name| {
                self.query_ids(&format!(
                    "INSERT INTO eating_genre_list (genre_name) VALUES ('{name}') RETURNING genre_id"
                ))
            })
            .collect()
    }

    /// Insert named categories and return their identifiers in order.
    pub fn insert_categories(&self, names: &[&str]) -> Vec<i64> {
        names
            .iter()
            .flat_map(|name| {
                self.query_ids(&format!(
                    "INSERT INTO eating_category_list (category_name) VALUES ('{name}') \
                     RETURNING category_id"
                ))
            })
            .collect()
    }
}

/// Start a database or apply the skip policy.
pub fn start_database() -> Option<TestDatabase> {
    match TestDatabase::start() {
        Ok(db) => Some(db),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
