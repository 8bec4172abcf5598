pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id   BLOB PRIMARY KEY NOT NULL,
    name TEXT NOT NULL
);
"#;

pub const CREATE_WAYPOINTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS waypoints (
    id           BLOB PRIMARY KEY NOT NULL,
    user_id      BLOB NOT NULL REFERENCES users (id),
    latitude     REAL NOT NULL,
    longitude    REAL NOT NULL,
    stop_time_us INTEGER NOT NULL
);
"#;

pub const CREATE_WAYPOINTS_USER_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_waypoints_user_stop_time ON waypoints (user_id, stop_time_us);
"#;

pub const CREATE_WAYPOINTS_STOP_TIME_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_waypoints_stop_time ON waypoints (stop_time_us);
"#;

pub const INSERT_USER: &str = r#"
INSERT INTO users (id, name) VALUES (?, ?);
"#;

pub const SELECT_USER_EXISTS: &str = r#"
SELECT EXISTS (SELECT 1 FROM users WHERE id = ?);
"#;

pub const INSERT_WAYPOINT: &str = r#"
INSERT INTO waypoints (id, user_id, latitude, longitude, stop_time_us)
VALUES (?, ?, ?, ?, ?);
"#;

// Equal stop times come back in whatever order SQLite scans them.
pub const SELECT_WAYPOINTS_BY_USER: &str = r#"
SELECT id, user_id, latitude, longitude, stop_time_us
FROM waypoints
WHERE user_id = ?
ORDER BY stop_time_us ASC;
"#;

pub const SELECT_WAYPOINTS_AFTER: &str = r#"
SELECT id, user_id, latitude, longitude, stop_time_us
FROM waypoints
WHERE stop_time_us > ?;
"#;

pub const COUNT_WAYPOINTS: &str = r#"
SELECT COUNT(*) FROM waypoints;
"#;
