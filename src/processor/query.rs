use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::db::WaypointStore;
use crate::error::{LocationError, Result};
use crate::models::{in_bounds, GeoCoordinate, Waypoint};

/// Read side of the tracker: composes store fetches with pagination and
/// bounding-box filtering.
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<dyn WaypointStore>,
}

impl QueryEngine {
    pub fn new(store: Arc<dyn WaypointStore>) -> Self {
        Self { store }
    }

    /// The user's waypoint with the latest stop time.
    ///
    /// When several waypoints share the latest stop time, which one is
    /// returned depends on store iteration order.
    pub async fn get_last_location(&self, user_id: Uuid) -> Result<Waypoint> {
        let waypoint = self
            .store
            .query_by_user(user_id)
            .await?
            .pop()
            .ok_or(LocationError::NoWaypoints(user_id))?;
        debug!("Last location for user {} at {}", user_id, waypoint.stop_time);
        Ok(waypoint)
    }

    /// The user's waypoints ascending by stop time. A `page_size` of 0
    /// returns everything and ignores `page`.
    pub async fn get_all_locations(
        &self,
        user_id: Uuid,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<Waypoint>> {
        let (page, page_size) = validate_page(page, page_size)?;
        let waypoints = self.store.query_by_user(user_id).await?;
        let total = waypoints.len();
        let waypoints = paginate(waypoints, page, page_size);
        debug!(
            "Fetched {} of {} waypoints for user {} (page {}, size {})",
            waypoints.len(),
            total,
            user_id,
            page,
            page_size
        );
        Ok(waypoints)
    }

    /// Waypoints of every user with `stop_time` strictly after `stops_after`.
    pub async fn get_recent_for_all_users(&self, stops_after: DateTime<Utc>) -> Result<Vec<Waypoint>> {
        let waypoints = self.store.query_by_time_after(stops_after).await?;
        debug!("{} waypoints after {}", waypoints.len(), stops_after);
        Ok(waypoints)
    }

    /// Like [`Self::get_recent_for_all_users`], then keeps only waypoints
    /// inside the box. No antimeridian handling.
    pub async fn get_recent_for_all_users_in_bounds(
        &self,
        stops_after: DateTime<Utc>,
        south_west: GeoCoordinate,
        north_east: GeoCoordinate,
    ) -> Result<Vec<Waypoint>> {
        let mut waypoints = self.store.query_by_time_after(stops_after).await?;
        let fetched = waypoints.len();
        waypoints.retain(|w| in_bounds(w.coordinate(), south_west, north_east));
        debug!(
            "{} of {} waypoints after {} within {:?}..{:?}",
            waypoints.len(),
            fetched,
            stops_after,
            south_west,
            north_east
        );
        Ok(waypoints)
    }
}

fn validate_page(page: i64, page_size: i64) -> Result<(usize, usize)> {
    let page = usize::try_from(page)
        .map_err(|_| LocationError::invalid_argument("page", format!("must be non-negative, got {page}")))?;
    let page_size = usize::try_from(page_size).map_err(|_| {
        LocationError::invalid_argument("page_size", format!("must be non-negative, got {page_size}"))
    })?;
    Ok((page, page_size))
}

/// Slice `[page * page_size, page * page_size + page_size)`; past the end
/// (or overflowing) yields nothing.
fn paginate(waypoints: Vec<Waypoint>, page: usize, page_size: usize) -> Vec<Waypoint> {
    if page_size == 0 {
        return waypoints;
    }
    match page.checked_mul(page_size) {
        Some(start) if start < waypoints.len() => {
            waypoints.into_iter().skip(start).take(page_size).collect()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteWaypointStore;
    use crate::models::User;
    use crate::test_support::{at, memory_store};

    const SOUTH_WEST: GeoCoordinate = GeoCoordinate::new(53.118755, -1.448822);
    const NORTH_EAST: GeoCoordinate = GeoCoordinate::new(55.118755, 2.448822);

    async fn setup() -> (Arc<SqliteWaypointStore>, QueryEngine) {
        let store = Arc::new(memory_store().await);
        let engine = QueryEngine::new(store.clone());
        (store, engine)
    }

    async fn user_with_waypoints(store: &SqliteWaypointStore, name: &str, hours: &[i64]) -> User {
        let user = User::new(name);
        store.create_user(&user).await.unwrap();
        for &hour in hours {
            store
                .insert(&Waypoint::new(user.id, 53.118755, -1.448822, at(hour)))
                .await
                .unwrap();
        }
        user
    }

    #[tokio::test]
    async fn last_location_is_latest_stop_time() {
        let (store, engine) = setup().await;
        let user = user_with_waypoints(&store, "User1", &[24, 0, 12]).await;

        let last = engine.get_last_location(user.id).await.unwrap();
        assert_eq!(last.stop_time, at(24));
        assert_eq!(last.user_id, user.id);
    }

    #[tokio::test]
    async fn last_location_without_waypoints_fails() {
        let (store, engine) = setup().await;
        let user = user_with_waypoints(&store, "User1", &[]).await;

        let err = engine.get_last_location(user.id).await.unwrap_err();
        assert!(matches!(err, LocationError::NoWaypoints(id) if id == user.id));
    }

    #[tokio::test]
    async fn queries_only_return_the_requested_users_data() {
        let (store, engine) = setup().await;
        let first = user_with_waypoints(&store, "User1", &[1, 3]).await;
        let second = user_with_waypoints(&store, "User2", &[2, 4, 6]).await;

        let all = engine.get_all_locations(first.id, 0, 0).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|w| w.user_id == first.id));

        assert_eq!(engine.get_last_location(first.id).await.unwrap().stop_time, at(3));
        assert_eq!(engine.get_last_location(second.id).await.unwrap().stop_time, at(6));
    }

    #[tokio::test]
    async fn pages_reconstruct_the_full_sequence() {
        let (store, engine) = setup().await;
        let user = user_with_waypoints(&store, "User1", &[7, 2, 9, 0, 5, 3, 8]).await;

        let full = engine.get_all_locations(user.id, 0, 0).await.unwrap();
        let times: Vec<_> = full.iter().map(|w| w.stop_time).collect();
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted);

        let mut rebuilt = Vec::new();
        for page in 0.. {
            let chunk = engine.get_all_locations(user.id, page, 3).await.unwrap();
            if chunk.is_empty() {
                break;
            }
            assert!(chunk.len() <= 3);
            rebuilt.extend(chunk);
        }
        assert_eq!(rebuilt, full);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let (store, engine) = setup().await;
        let user = user_with_waypoints(&store, "User1", &[1, 2]).await;

        assert!(engine.get_all_locations(user.id, 1, 2).await.unwrap().is_empty());
        assert!(engine.get_all_locations(user.id, 50, 10).await.unwrap().is_empty());
        assert!(engine
            .get_all_locations(user.id, i64::MAX, i64::MAX)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn zero_page_size_ignores_page() {
        let (store, engine) = setup().await;
        let user = user_with_waypoints(&store, "User1", &[1, 2, 3]).await;

        assert_eq!(engine.get_all_locations(user.id, 4, 0).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn negative_paging_arguments_are_rejected() {
        let (store, engine) = setup().await;
        let user = user_with_waypoints(&store, "User1", &[1]).await;

        let err = engine.get_all_locations(user.id, -1, 10).await.unwrap_err();
        assert!(matches!(err, LocationError::InvalidArgument { name: "page", .. }));

        let err = engine.get_all_locations(user.id, 0, -5).await.unwrap_err();
        assert!(matches!(err, LocationError::InvalidArgument { name: "page_size", .. }));
    }

    #[tokio::test]
    async fn recent_excludes_waypoints_at_the_threshold() {
        let (store, engine) = setup().await;
        user_with_waypoints(&store, "User1", &[48]).await;
        user_with_waypoints(&store, "User2", &[24, 0]).await;

        let recent = engine.get_recent_for_all_users(at(24)).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].stop_time, at(48));

        let recent = engine
            .get_recent_for_all_users(at(24) - chrono::Duration::minutes(1))
            .await
            .unwrap();
        assert_eq!(recent.len(), 2);
        assert!(recent.iter().all(|w| w.stop_time != at(0)));
    }

    #[tokio::test]
    async fn recent_in_bounds_filters_by_box() {
        let (store, engine) = setup().await;
        let user = User::new("User1");
        store.create_user(&user).await.unwrap();

        let inside = Waypoint::new(user.id, 54.118755, 2.148822, at(2));
        let south = Waypoint::new(user.id, 52.918755, 1.948822, at(2));
        let west = Waypoint::new(user.id, 54.918755, -2.948822, at(2));
        let too_old = Waypoint::new(user.id, 54.118755, 2.148822, at(0));
        for waypoint in [&inside, &south, &west, &too_old] {
            store.insert(waypoint).await.unwrap();
        }

        let found = engine
            .get_recent_for_all_users_in_bounds(at(1), SOUTH_WEST, NORTH_EAST)
            .await
            .unwrap();
        assert_eq!(found, vec![inside]);
    }

    #[test]
    fn paginate_slices_by_page() {
        let user_id = Uuid::new_v4();
        let waypoints: Vec<_> = (0..5)
            .map(|h| Waypoint::new(user_id, 0.0, 0.0, at(h)))
            .collect();

        let page = paginate(waypoints.clone(), 1, 2);
        assert_eq!(page, waypoints[2..4].to_vec());
        assert_eq!(paginate(waypoints.clone(), 2, 2), waypoints[4..].to_vec());
        assert!(paginate(waypoints, 3, 2).is_empty());
    }
}
