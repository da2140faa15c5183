//! Runtime configuration from environment variables.
//!
//! `HOST` (default `0.0.0.0`), `PORT` (default `8080`) and `SCOREBOARD_PATH`
//! (default `scoreboards.json`).

use std::path::PathBuf;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_path() -> PathBuf {
    PathBuf::from("scoreboards.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_path: default_data_path(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; an unparsable `PORT` falls back to the default.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: get("HOST").unwrap_or_else(default_host),
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_port),
            data_path: get("SCOREBOARD_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_data_path),
        }
    }
}
