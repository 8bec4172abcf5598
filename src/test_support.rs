use chrono::{DateTime, TimeZone, Utc};

use crate::db::{self, SqliteWaypointStore};

pub async fn memory_store() -> SqliteWaypointStore {
    let pool = db::init_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    db::init_schema(&pool)
        .await
        .expect("Failed to create schema");
    SqliteWaypointStore::new(pool)
}

/// A fixed day, offset by whole hours, so tests can order stop times.
pub fn at(hour: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() + chrono::Duration::hours(hour)
}
