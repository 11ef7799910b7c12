use std::net::SocketAddr;

use anyhow::{anyhow, Context as _};
use tracing_subscriber::filter::LevelFilter;

// Defaults used when the matching environment variable is unset
const DEFAULT_DATABASE_URL: &str = "sqlite:capture.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8899";
const DEFAULT_LOG_LEVEL: &str = "info";

pub const DATABASE_URL_VAR: &str = "CAPTURE_DATABASE_URL";
pub const BIND_ADDR_VAR: &str = "CAPTURE_BIND_ADDR";
pub const LOG_LEVEL_VAR: &str = "CAPTURE_LOG_LEVEL";

/// Runtime settings for the inspection server
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub log_level: LevelFilter,
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let raw_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("parse {BIND_ADDR_VAR} `{raw_addr}`"))?;

        let raw_level = lookup(LOG_LEVEL_VAR).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let log_level = parse_log_level(&raw_level)?;

        Ok(Self {
            database_url,
            bind_addr,
            log_level,
        })
    }
}

fn parse_log_level(raw_level: &str) -> anyhow::Result<LevelFilter> {
    raw_level
        .trim()
        .to_ascii_lowercase()
        .parse::<LevelFilter>()
        .map_err(|_| {
            anyhow!(
                "invalid log level `{raw_level}`; expected one of trace, debug, info, warn, error, off"
            )
        })
}
