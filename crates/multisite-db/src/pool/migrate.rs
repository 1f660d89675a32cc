//! Runtime schema migrations
//!
//! Migrations are read from a directory at startup so the binaries do not
//! need the SQLx macros to embed them.

use std::path::Path;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPool;
use tracing::info;

/// Apply every pending migration found in `dir`
pub async fn run_migrations(pool: &PgPool, dir: impl AsRef<Path>) -> Result<(), MigrateError> {
    let dir = dir.as_ref();
    let migrator = Migrator::new(dir).await?;

    info!(
        dir = %dir.display(),
        available = migrator.iter().count(),
        "Running database migrations"
    );
    migrator.run(pool).await
}
