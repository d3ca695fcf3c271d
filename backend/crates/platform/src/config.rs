//! Environment Configuration
//!
//! Typed readers over process environment variables. Every crate builds its
//! own config struct from these; parsing rules live here so they agree.

use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::crypto::SecretKey;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Read a variable, treating blank values as unset
pub fn env_string(name: &'static str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a required variable
pub fn env_required(name: &'static str) -> ConfigResult<String> {
    env_string(name).ok_or(ConfigError::Missing(name))
}

/// Read a variable or fall back to a default
pub fn env_or(name: &'static str, default: &str) -> String {
    env_string(name).unwrap_or_else(|| default.to_string())
}

/// Read a comma-separated list
pub fn env_list(name: &'static str) -> Option<Vec<String>> {
    env_string(name).map(|raw| parse_list(&raw))
}

/// Read a boolean flag
pub fn env_bool(name: &'static str, default: bool) -> ConfigResult<bool> {
    match env_string(name) {
        None => Ok(default),
        Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
            name,
            reason: format!("expected a boolean, got {raw:?}"),
        }),
    }
}

/// Read and parse a value with `FromStr`
pub fn env_parse<T>(name: &'static str, default: T) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}

/// Read a base64-encoded secret
///
/// Returns `Ok(None)` when unset; a set but undecodable or empty value is an
/// error rather than silently disabling whatever depends on it.
pub fn env_secret(name: &'static str) -> ConfigResult<Option<SecretKey>> {
    let Some(raw) = env_string(name) else {
        return Ok(None);
    };
    let secret = SecretKey::from_base64(&raw).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;
    if secret.is_empty() {
        return Err(ConfigError::Invalid {
            name,
            reason: "decoded secret is empty".to_string(),
        });
    }
    Ok(Some(secret))
}

/// Read a secret that must exist in release builds
///
/// Debug builds generate a random secret and log a warning instead.
pub fn env_secret_or_dev(name: &'static str, dev_len: usize) -> ConfigResult<SecretKey> {
    match env_secret(name)? {
        Some(secret) => Ok(secret),
        None if cfg!(debug_assertions) => {
            tracing::warn!(variable = name, "secret not set, using a random development value");
            Ok(SecretKey::random(dev_len))
        }
        None => Err(ConfigError::Missing(name)),
    }
}

/// Split a comma-separated list, dropping blanks
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse common boolean spellings
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
