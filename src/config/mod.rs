//! Configuration module for the room directory backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file. `None` keeps rooms in memory only.
    pub db_path: Option<PathBuf>,
    /// Load the sample rooms into an empty store
    pub seed_sample_data: bool,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Body of the ping endpoint
    pub ping_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            seed_sample_data: true,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: "info".to_string(),
            log_json: false,
            ping_message: "ping".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AddrParseError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let db_path = env::var("ROOMDIR_DB_PATH")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let seed_sample_data = env::var("ROOMDIR_SEED")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.seed_sample_data);

        let bind_addr = match env::var("ROOMDIR_BIND_ADDR") {
            Ok(addr) => addr.parse()?,
            Err(_) => defaults.bind_addr,
        };

        let log_level = env::var("ROOMDIR_LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_json = env::var("ROOMDIR_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(defaults.log_json);

        let ping_message = env::var("PING_MESSAGE").unwrap_or(defaults.ping_message);

        Ok(Self {
            db_path,
            seed_sample_data,
            bind_addr,
            log_level,
            log_json,
            ping_message,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
