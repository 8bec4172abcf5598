use std::sync::Arc;

use location_tracker::config::AppConfig;
use location_tracker::db::{self, SqliteWaypointStore};
use location_tracker::{ingest, LocationTracker, User};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    info!("Starting Location Tracker...");

    // Init DB
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    db::init_schema(&pool).await?;
    info!("Connected to database {}", config.database_url);

    let store = Arc::new(SqliteWaypointStore::new(pool));
    for name in &config.seed_users {
        let user = User::new(name.as_str());
        store.create_user(&user).await?;
        info!("Seeded user {} ({})", user.name, user.id);
    }

    let tracker = LocationTracker::new(store);
    tracker.subscribe(|event| {
        let waypoint = &event.waypoint;
        info!(
            "Waypoint added: user {} at ({}, {}) stop_time {}",
            waypoint.user_id, waypoint.latitude, waypoint.longitude, waypoint.stop_time
        );
        Ok(())
    });

    // Consume stdin
    ingest::consume_stdin(&tracker).await?;

    Ok(())
}
