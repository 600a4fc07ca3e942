//! Load settings from the environment (with `.env` support) and apply override maps.

use crate::config::types::Config;
use crate::error::ConfigError;
use serde_json::{Map, Value};
use std::str::FromStr;

const ENV_DATABASE_URL: &str = "DATABASE_URL";
const ENV_BIND_ADDR: &str = "BIND_ADDR";
const ENV_MAX_CONNECTIONS: &str = "MAX_CONNECTIONS";
const ENV_BODY_LIMIT_BYTES: &str = "BODY_LIMIT_BYTES";
const ENV_DEBUG: &str = "DEBUG";

impl Config {
    /// Defaults overlaid with `DATABASE_URL`, `BIND_ADDR`, `MAX_CONNECTIONS`, `BODY_LIMIT_BYTES`, `DEBUG`.
    /// A `.env` file in the working directory is loaded first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            config.database_url = url;
        }
        if let Some(v) = lookup(ENV_BIND_ADDR) {
            config.bind_addr = parse_var(ENV_BIND_ADDR, &v)?;
        }
        if let Some(v) = lookup(ENV_MAX_CONNECTIONS) {
            config.max_connections = parse_var(ENV_MAX_CONNECTIONS, &v)?;
        }
        if let Some(v) = lookup(ENV_BODY_LIMIT_BYTES) {
            config.body_limit_bytes = parse_var(ENV_BODY_LIMIT_BYTES, &v)?;
        }
        if let Some(v) = lookup(ENV_DEBUG) {
            config.debug = parse_flag(&v);
        }
        if config.max_connections == 0 {
            return Err(ConfigError::Validation(format!("{} must be at least 1", ENV_MAX_CONNECTIONS)));
        }
        Ok(config)
    }

    /// Shallow merge: each key in `overrides` replaces the field of the same name.
    /// Unknown keys or values of the wrong type are rejected.
    pub fn merge(&self, overrides: &Map<String, Value>) -> Result<Self, ConfigError> {
        let mut base = match serde_json::to_value(self) {
            Ok(Value::Object(m)) => m,
            Ok(_) => return Err(ConfigError::Load("config did not serialize to an object".into())),
            Err(e) => return Err(ConfigError::Load(e.to_string())),
        };
        for (key, value) in overrides {
            base.insert(key.clone(), value.clone());
        }
        let merged: Config = serde_json::from_value(Value::Object(base))
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        if merged.max_connections == 0 {
            return Err(ConfigError::Validation("max_connections must be at least 1".into()));
        }
        Ok(merged)
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::Validation(format!("{}: {}", key, e)))
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
