//! Connection and pool helpers for database access.

use cfg_if::cfg_if;
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, PoolError, bb8::Pool};
#[cfg(feature = "sqlite")]
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, embed_migrations};

cfg_if! {
    if #[cfg(all(feature = "sqlite", feature = "postgres", not(feature = "lint")))] {
        compile_error!("Either feature 'sqlite' or 'postgres' must be enabled, not both");
    } else if #[cfg(feature = "sqlite")] {
        use diesel::sqlite::{Sqlite, SqliteConnection};
        /// Database backend type for `SQLite`.
        pub type Backend = Sqlite;
        /// Embedded database migrations for `SQLite`.
        pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/sqlite");
        /// Connection type for `SQLite` database access.
        pub type DbConnection = SyncConnectionWrapper<SqliteConnection>;
        /// Connection pool type for `SQLite`.
        pub type DbPool = Pool<DbConnection>;
    } else if #[cfg(all(feature = "postgres", not(feature = "sqlite")))] {
        use diesel::pg::Pg;
        use diesel_async::AsyncPgConnection;
        /// Database backend type for PostgreSQL.
        pub type Backend = Pg;
        /// Embedded database migrations for PostgreSQL.
        pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/postgres");
        /// Connection type for PostgreSQL database access.
        pub type DbConnection = AsyncPgConnection;
        /// Connection pool type for PostgreSQL.
        pub type DbPool = Pool<DbConnection>;
    } else {
        compile_error!("Either feature 'sqlite' or 'postgres' must be enabled");
    }
}

/// Create a pooled connection to the configured database.
///
/// # Errors
/// Returns any error reported by the underlying connection pool builder.
#[must_use = "handle the result"]
pub async fn establish_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let config = AsyncDieselConnectionManager::<DbConnection>::new(database_url);
    Pool::builder().build(config).await
}

/// Create a pool capped at `max_size` connections.
///
/// An in-memory `SQLite` database exists per connection, so callers working
/// against `:memory:` need a single-connection pool to observe their own
/// writes.
///
/// # Errors
/// Returns any error reported by the underlying connection pool builder.
#[must_use = "handle the result"]
pub async fn establish_pool_sized(database_url: &str, max_size: u32) -> Result<DbPool, PoolError> {
    let config = AsyncDieselConnectionManager::<DbConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(config).await
}
