pub mod insertion;
pub mod message_processor;
pub mod query;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::WaypointStore;
use crate::error::Result;
use crate::events::{SubscriptionId, WaypointAdded, WaypointEvents};
use crate::models::{GeoCoordinate, Waypoint};

pub use insertion::InsertionPipeline;
pub use message_processor::process_message;
pub use query::QueryEngine;

/// The tracker's public surface: one insert, four queries and listener
/// registration, all sharing one store and one listener registry.
#[derive(Clone)]
pub struct LocationTracker {
    events: Arc<WaypointEvents>,
    insertion: InsertionPipeline,
    queries: QueryEngine,
}

impl LocationTracker {
    pub fn new(store: Arc<dyn WaypointStore>) -> Self {
        Self::with_events(store, Arc::new(WaypointEvents::new()))
    }

    pub fn with_events(store: Arc<dyn WaypointStore>, events: Arc<WaypointEvents>) -> Self {
        Self {
            insertion: InsertionPipeline::new(Arc::clone(&store), Arc::clone(&events)),
            queries: QueryEngine::new(store),
            events,
        }
    }

    pub fn events(&self) -> &Arc<WaypointEvents> {
        &self.events
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&WaypointAdded) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub async fn add_location(&self, waypoint: Waypoint) -> Result<Waypoint> {
        self.insertion.add_location(waypoint).await
    }

    pub async fn get_last_location(&self, user_id: Uuid) -> Result<Waypoint> {
        self.queries.get_last_location(user_id).await
    }

    pub async fn get_all_locations(&self, user_id: Uuid, page: i64, page_size: i64) -> Result<Vec<Waypoint>> {
        self.queries.get_all_locations(user_id, page, page_size).await
    }

    pub async fn get_recent_for_all_users(&self, stops_after: DateTime<Utc>) -> Result<Vec<Waypoint>> {
        self.queries.get_recent_for_all_users(stops_after).await
    }

    pub async fn get_recent_for_all_users_in_bounds(
        &self,
        stops_after: DateTime<Utc>,
        south_west: GeoCoordinate,
        north_east: GeoCoordinate,
    ) -> Result<Vec<Waypoint>> {
        self.queries
            .get_recent_for_all_users_in_bounds(stops_after, south_west, north_east)
            .await
    }
}
