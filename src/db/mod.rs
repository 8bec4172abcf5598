use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

pub mod queries;
pub mod store;

pub use store::{SqliteWaypointStore, WaypointStore};

pub type DbPool = Pool<Sqlite>;

pub fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Opens the pool with foreign keys enforced on every connection.
///
/// An in-memory database lives and dies with its connection, so it gets a
/// single connection that is never recycled.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if is_memory_url(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    pool_options.connect_with(options).await
}

pub async fn init_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    for statement in [
        queries::CREATE_USERS_TABLE,
        queries::CREATE_WAYPOINTS_TABLE,
        queries::CREATE_WAYPOINTS_USER_INDEX,
        queries::CREATE_WAYPOINTS_STOP_TIME_INDEX,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
