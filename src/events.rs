//! In-process "waypoint added" notifications.
//!
//! Delivery is synchronous and in registration order. There is no
//! durability and no replay for listeners that subscribe late.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::{LocationError, Result};
use crate::models::Waypoint;

/// Payload handed to every listener after a successful insert.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointAdded {
    pub waypoint: Waypoint,
}

/// Handle returned by [`WaypointEvents::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub type Listener = Arc<dyn Fn(&WaypointAdded) -> anyhow::Result<()> + Send + Sync>;

#[derive(Default)]
pub struct WaypointEvents {
    next_id: AtomicU64,
    listeners: RwLock<BTreeMap<SubscriptionId, Listener>>,
}

impl WaypointEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&WaypointAdded) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        // Ids only grow, so map order is registration order.
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(listener));
        debug!("Registered waypoint listener {}", id);
        id
    }

    /// Returns `false` if the handle was not (or no longer) registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some();
        if removed {
            debug!("Removed waypoint listener {}", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invokes every listener in registration order and stops at the first
    /// failure.
    ///
    /// The registry lock is released before any listener runs, so listeners
    /// may subscribe or unsubscribe; such changes apply from the next publish.
    pub fn publish(&self, event: &WaypointAdded) -> Result<()> {
        let snapshot: Vec<(SubscriptionId, Listener)> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        for (subscription, listener) in snapshot {
            listener(event).map_err(|error| LocationError::Listener {
                subscription,
                error,
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for WaypointEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaypointEvents")
            .field("listeners", &self.len())
            .finish()
    }
}
