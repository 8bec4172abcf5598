use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::{future, TryStreamExt};
use tracing::debug;
use uuid::Uuid;

use super::{queries, DbPool};
use crate::error::{LocationError, Result};
use crate::models::{User, Waypoint, WaypointRow};

/// Read/write contract the tracker needs from durable storage.
///
/// Geographic predicates are never pushed down here; callers filter
/// bounding boxes after a time-based fetch.
#[async_trait]
pub trait WaypointStore: Send + Sync {
    /// Persists the waypoint and returns its id.
    async fn insert(&self, waypoint: &Waypoint) -> Result<Uuid>;

    async fn exists_user(&self, user_id: Uuid) -> Result<bool>;

    /// All of the user's waypoints, ascending by stop time. Ties keep store
    /// iteration order, which is unspecified.
    async fn query_by_user(&self, user_id: Uuid) -> Result<Vec<Waypoint>>;

    /// Every waypoint with `stop_time > threshold`, in no particular order.
    async fn query_by_time_after(&self, threshold: DateTime<Utc>) -> Result<Vec<Waypoint>>;
}

#[derive(Debug, Clone)]
pub struct SqliteWaypointStore {
    pool: DbPool,
}

impl SqliteWaypointStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Account creation belongs to the identity side; this exists for
    /// seeding and tests.
    pub async fn create_user(&self, user: &User) -> Result<()> {
        sqlx::query(queries::INSERT_USER)
            .bind(user.id)
            .bind(&user.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count_waypoints(&self) -> Result<i64> {
        let count = sqlx::query_scalar(queries::COUNT_WAYPOINTS)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn fetch_waypoints<'q>(
        &self,
        query: sqlx::query::QueryAs<'q, sqlx::Sqlite, WaypointRow, sqlx::sqlite::SqliteArguments<'q>>,
    ) -> Result<Vec<Waypoint>> {
        let waypoints = query
            .fetch(&self.pool)
            .and_then(|row| future::ready(Waypoint::try_from(row)))
            .map_err(LocationError::from)
            .try_collect()
            .await?;
        Ok(waypoints)
    }
}

#[async_trait]
impl WaypointStore for SqliteWaypointStore {
    async fn insert(&self, waypoint: &Waypoint) -> Result<Uuid> {
        let result = sqlx::query(queries::INSERT_WAYPOINT)
            .bind(waypoint.id)
            .bind(waypoint.user_id)
            .bind(waypoint.latitude)
            .bind(waypoint.longitude)
            .bind(waypoint.stop_time.timestamp_micros())
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                debug!("Stored waypoint {} for user {}", waypoint.id, waypoint.user_id);
                Ok(waypoint.id)
            }
            // The user vanished between the existence check and the write.
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(LocationError::UserNotFound(waypoint.user_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists_user(&self, user_id: Uuid) -> Result<bool> {
        let exists: i64 = sqlx::query_scalar(queries::SELECT_USER_EXISTS)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists != 0)
    }

    async fn query_by_user(&self, user_id: Uuid) -> Result<Vec<Waypoint>> {
        self.fetch_waypoints(sqlx::query_as(queries::SELECT_WAYPOINTS_BY_USER).bind(user_id))
            .await
    }

    async fn query_by_time_after(&self, threshold: DateTime<Utc>) -> Result<Vec<Waypoint>> {
        self.fetch_waypoints(
            sqlx::query_as(queries::SELECT_WAYPOINTS_AFTER).bind(threshold.timestamp_micros()),
        )
        .await
    }
}
