use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const BUSY_TIMEOUT_MS: u32 = 5_000;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection unavailable: {0}")]
    Pool(#[from] r2d2::PoolError),

    #[error("failed to run database migrations: {0}")]
    Migration(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("{table} with id {id} does not exist")]
    MissingReference { table: &'static str, id: i32 },

    #[error("query failed: {0}")]
    Query(DieselError),
}

impl From<DieselError> for StoreError {
    fn from(error: DieselError) -> Self {
        match error {
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => StoreError::ConstraintViolation(info.message().to_string()),
            other => StoreError::Query(other),
        }
    }
}

/// SQLite leaves foreign keys off per connection, so every pooled connection
/// turns them on when it is opened.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool, StoreError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)?;

    // Run pending migrations on startup
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Migration(e.to_string()))?;
    if !applied.is_empty() {
        tracing::info!(count = applied.len(), "applied database migrations");
    }

    Ok(pool)
}

/// Checks a connection out of the pool and runs `f` inside one transaction.
///
/// The transaction takes the write lock up front (`BEGIN IMMEDIATE`), so a
/// read followed by a write inside `f` waits on `busy_timeout` for other
/// writers instead of failing with `SQLITE_BUSY`. It commits when `f`
/// returns `Ok` and rolls back otherwise.
pub fn in_transaction<T, F>(pool: &DbPool, f: F) -> Result<T, StoreError>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T, StoreError>,
{
    let mut pooled = pool.get()?;
    let conn: &mut SqliteConnection = &mut pooled;
    conn.immediate_transaction(f)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{create_pool, DbPool};
    use tempfile::TempDir;

    /// A pool over a fresh database file that lives as long as this value.
    pub struct TestDb {
        pub pool: DbPool,
        _dir: TempDir,
    }

    pub fn test_db() -> TestDb {
        test_db_with_pool_size(2)
    }

    pub fn test_db_with_pool_size(max_size: u32) -> TestDb {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("restaurant-test.db");
        let pool = create_pool(path.to_str().unwrap(), max_size).unwrap();
        TestDb { pool, _dir: dir }
    }
}
