use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::geo::GeoCoordinate;

/// A single recorded (user, location, time) observation.
///
/// Waypoints are immutable once persisted; there is no update path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: Uuid,
    pub user_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub stop_time: DateTime<Utc>,
}

impl Waypoint {
    /// Builds a waypoint with a fresh id. `stop_time` is truncated to
    /// microseconds, the precision the store keeps.
    pub fn new(user_id: Uuid, latitude: f64, longitude: f64, stop_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            latitude,
            longitude,
            stop_time: stop_time.trunc_subsecs(6),
        }
    }

    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.latitude, self.longitude)
    }
}

/// Storage shape of a waypoint: stop time as microseconds since the epoch
/// so SQL ordering and comparison are exact.
#[derive(Debug, FromRow)]
pub struct WaypointRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub stop_time_us: i64,
}

impl TryFrom<WaypointRow> for Waypoint {
    type Error = sqlx::Error;

    fn try_from(row: WaypointRow) -> Result<Self, Self::Error> {
        let stop_time = DateTime::from_timestamp_micros(row.stop_time_us).ok_or_else(|| {
            sqlx::Error::Decode(
                format!(
                    "waypoint {} has out-of-range stop_time_us {}",
                    row.id, row.stop_time_us
                )
                .into(),
            )
        })?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            latitude: row.latitude,
            longitude: row.longitude,
            stop_time,
        })
    }
}
