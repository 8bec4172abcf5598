use thiserror::Error;
use uuid::Uuid;

use crate::events::SubscriptionId;

pub type Result<T> = std::result::Result<T, LocationError>;

#[derive(Error, Debug)]
pub enum LocationError {
    /// Insertion referenced a user id the store does not know.
    #[error("user not found: {0}")]
    UserNotFound(Uuid),

    /// The user has no recorded waypoints.
    #[error("no waypoints recorded for user {0}")]
    NoWaypoints(Uuid),

    /// Caller contract violation, e.g. a negative page index.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A waypoint-added listener failed. The waypoint is already persisted.
    #[error("waypoint listener {subscription} failed: {error:#}")]
    Listener {
        subscription: SubscriptionId,
        error: anyhow::Error,
    },

    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl LocationError {
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
