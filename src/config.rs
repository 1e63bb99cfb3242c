//! Application configuration.
//!
//! Settings resolve with priority: config.toml > environment (.env) > default.

use serde::Deserialize;
use std::path::Path;

// ==================== Defaults ====================

/// Remote MicroLearn API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// Server address to bind to
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Session expiration time in hours of inactivity
pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 12;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

pub const CONFIG_FILE: &str = "config.toml";

// ==================== config.toml structure ====================

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api: Option<ApiSection>,
    server: Option<ServerSection>,
    session: Option<SessionSection>,
}

#[derive(Debug, Deserialize)]
struct ApiSection {
    base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    addr: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct SessionSection {
    expiry_hours: Option<i64>,
}

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub server_addr: String,
    pub server_port: u16,
    pub session_expiry_hours: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            session_expiry_hours: DEFAULT_SESSION_EXPIRY_HOURS,
        }
    }
}

impl Settings {
    /// Full server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_addr, self.server_port)
    }
}

/// Load settings from `config.toml` in the working directory and the
/// process environment.
pub fn load_settings() -> Settings {
    // Load .env file if present
    let _ = dotenvy::dotenv();
    load_settings_with(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Resolve settings from a config file path and an environment lookup.
pub fn load_settings_with(config_path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let file = read_config_file(config_path);
    let defaults = Settings::default();

    let api_base = file
        .api
        .and_then(|a| a.base_url)
        .or_else(|| env("MICROLEARN_API_BASE"))
        .unwrap_or(defaults.api_base);

    let (file_addr, file_port) = match file.server {
        Some(server) => (server.addr, server.port),
        None => (None, None),
    };

    let server_addr = file_addr
        .or_else(|| env("SERVER_ADDR"))
        .unwrap_or(defaults.server_addr);

    let server_port = file_port
        .or_else(|| env("PORT").and_then(|p| parse_or_warn("PORT", &p)))
        .unwrap_or(defaults.server_port);

    let session_expiry_hours = file
        .session
        .and_then(|s| s.expiry_hours)
        .or_else(|| {
            env("SESSION_EXPIRY_HOURS").and_then(|h| parse_or_warn("SESSION_EXPIRY_HOURS", &h))
        })
        .unwrap_or(defaults.session_expiry_hours);

    let settings = Settings {
        api_base,
        server_addr,
        server_port,
        session_expiry_hours,
    };
    tracing::info!("Using remote API at {}", settings.api_base);
    settings
}

fn read_config_file(path: &Path) -> FileConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return FileConfig::default();
    };

    match toml::from_str::<FileConfig>(&contents) {
        Ok(config) => {
            tracing::info!("Loaded settings from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
            FileConfig::default()
        }
    }
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring invalid {} value: {}", key, value);
            None
        }
    }
}
