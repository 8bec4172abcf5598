use tracing::{info, warn};

use super::LocationTracker;
use crate::error::Result;
use crate::models::{Waypoint, WaypointMessage};

/// Parses one JSON payload and records it.
///
/// Payloads that cannot become a waypoint are logged and skipped with
/// `Ok(None)`. Domain and store errors from the insert are returned.
pub async fn process_message(tracker: &LocationTracker, payload: &[u8]) -> Result<Option<Waypoint>> {
    // 1. Parse JSON
    let message: WaypointMessage = match serde_json::from_slice(payload) {
        Ok(m) => m,
        Err(e) => {
            warn!("Failed to parse message: {}", e);
            return Ok(None);
        }
    };

    // 2. Extract Data
    let Some(user_id) = message.get_user_id() else {
        warn!("Message missing or invalid user_id, skipping: {:?}", message.user_id);
        return Ok(None);
    };

    let (Some(lat), Some(lon)) = (message.latitude, message.longitude) else {
        warn!("Message for user {} missing coordinates, skipping", user_id);
        return Ok(None);
    };

    let Some(stop_time) = message.get_stop_time() else {
        warn!(
            "Invalid stop_time for user {}: '{}'",
            user_id,
            message.stop_time.as_deref().unwrap_or("")
        );
        return Ok(None);
    };

    info!("Processing waypoint for user {} at {}", user_id, stop_time);

    // 3. Record
    let waypoint = tracker
        .add_location(Waypoint::new(user_id, lat, lon, stop_time))
        .await?;
    Ok(Some(waypoint))
}
