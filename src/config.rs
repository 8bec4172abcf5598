use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub log_level: String,
    pub seed_users: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let db_path = env::var("DB_PATH").unwrap_or_else(|_| ":memory:".to_string());
        let database_url = database_url(&db_path);

        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a positive integer, got '{raw}'"))?,
            Err(_) => 5,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let seed_users = parse_seed_users(
            &env::var("SEED_USERS").unwrap_or_else(|_| "User1,User2".to_string()),
        );

        Ok(Self {
            database_url,
            db_max_connections,
            log_level,
            seed_users,
        })
    }
}

fn database_url(db_path: &str) -> String {
    if db_path == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite://{}", db_path)
    }
}

fn parse_seed_users(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
