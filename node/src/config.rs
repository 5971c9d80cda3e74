// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::net::SocketAddr;
use std::path::PathBuf;

use lms_store::config::IdPolicy;
use lms_store::WriteMode;
use thiserror::Error;

pub const ENV_DB_PATH: &str = "LMS_DB_PATH";
pub const ENV_BIND_ADDR: &str = "LMS_BIND_ADDR";
pub const ENV_ID_POLICY: &str = "LMS_ID_POLICY";
pub const ENV_WRITE_MODE: &str = "LMS_WRITE_MODE";
pub const ENV_AUTH_TOKEN: &str = "LMS_AUTH_TOKEN";
pub const ENV_SEED_IF_MISSING: &str = "LMS_SEED_IF_MISSING";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub db_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub id_policy: IdPolicy,
    pub write_mode: WriteMode,
    /// Bearer token required on data routes. `None` leaves them open.
    pub auth_token: Option<String>,
    /// Write the demo document when `db_path` does not exist yet.
    pub seed_if_missing: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("data/db.json"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            id_policy: IdPolicy::default(),
            write_mode: WriteMode::default(),
            auth_token: None,
            seed_if_missing: false,
        }
    }
}

impl NodeConfig {
    /// Defaults overridden by `LMS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(path) = lookup(ENV_DB_PATH) {
            cfg.db_path = PathBuf::from(path);
        }
        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            cfg.bind_addr = addr.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: ENV_BIND_ADDR,
                reason: e.to_string(),
            })?;
        }
        if let Some(policy) = lookup(ENV_ID_POLICY) {
            cfg.id_policy = policy
                .parse()
                .map_err(|reason| ConfigError::Invalid { key: ENV_ID_POLICY, reason })?;
        }
        if let Some(mode) = lookup(ENV_WRITE_MODE) {
            cfg.write_mode = mode
                .parse()
                .map_err(|reason| ConfigError::Invalid { key: ENV_WRITE_MODE, reason })?;
        }
        cfg.auth_token = lookup(ENV_AUTH_TOKEN).filter(|t| !t.is_empty());
        if let Some(flag) = lookup(ENV_SEED_IF_MISSING) {
            cfg.seed_if_missing = parse_flag(&flag).ok_or_else(|| ConfigError::Invalid {
                key: ENV_SEED_IF_MISSING,
                reason: format!("expected true/false, got '{}'", flag),
            })?;
        }

        Ok(cfg)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
