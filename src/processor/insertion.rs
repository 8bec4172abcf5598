use std::sync::Arc;

use tracing::{info, warn};

use crate::db::WaypointStore;
use crate::error::{LocationError, Result};
use crate::events::{WaypointAdded, WaypointEvents};
use crate::models::Waypoint;

/// Write side of the tracker: validate, persist, notify.
#[derive(Clone)]
pub struct InsertionPipeline {
    store: Arc<dyn WaypointStore>,
    events: Arc<WaypointEvents>,
}

impl InsertionPipeline {
    pub fn new(store: Arc<dyn WaypointStore>, events: Arc<WaypointEvents>) -> Self {
        Self { store, events }
    }

    /// Persists `waypoint` and fires one `WaypointAdded` per success.
    ///
    /// Nothing is written and no event fires when the coordinates are out of
    /// range or the user is unknown. A failing listener is returned to the
    /// caller after the write has happened; later listeners are skipped.
    pub async fn add_location(&self, waypoint: Waypoint) -> Result<Waypoint> {
        if !waypoint.coordinate().is_valid() {
            warn!(
                "Rejected waypoint for user {}: coordinates ({}, {}) out of range",
                waypoint.user_id, waypoint.latitude, waypoint.longitude
            );
            return Err(LocationError::invalid_argument(
                "waypoint",
                format!(
                    "latitude {} / longitude {} outside [-90, 90] / [-180, 180]",
                    waypoint.latitude, waypoint.longitude
                ),
            ));
        }

        if !self.store.exists_user(waypoint.user_id).await? {
            warn!("Rejected waypoint for unknown user {}", waypoint.user_id);
            return Err(LocationError::UserNotFound(waypoint.user_id));
        }

        let id = self.store.insert(&waypoint).await?;
        let waypoint = Waypoint { id, ..waypoint };
        info!(
            "Added waypoint {} for user {} at ({}, {})",
            waypoint.id, waypoint.user_id, waypoint.latitude, waypoint.longitude
        );

        self.events.publish(&WaypointAdded {
            waypoint: waypoint.clone(),
        })?;

        Ok(waypoint)
    }
}
