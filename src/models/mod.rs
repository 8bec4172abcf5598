pub mod geo;
pub mod message;
pub mod user;
pub mod waypoint;

pub use geo::{in_bounds, GeoCoordinate};
pub use message::WaypointMessage;
pub use user::User;
pub use waypoint::{Waypoint, WaypointRow};
