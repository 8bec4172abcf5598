pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod ingest;
pub mod models;
pub mod processor;

#[cfg(test)]
mod test_support;

pub use error::{LocationError, Result};
pub use events::{SubscriptionId, WaypointAdded, WaypointEvents};
pub use models::{in_bounds, GeoCoordinate, User, Waypoint};
pub use processor::LocationTracker;
