//! Environment variable parsing utilities
//!
//! Unlike a silent `unwrap_or(default)`, a variable that is present but does not
//! parse is reported as an error so misconfiguration fails at startup.

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    #[error("{0} environment variable not set")]
    Missing(String),

    #[error("failed to parse {key}='{value}': {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Parse `key` from `lookup`, falling back to `default` when it is unset or blank
///
/// # Example
/// ```ignore
/// let port: u16 = parse_with(|k| std::env::var(k).ok(), "APP_PORT", 8080)?;
/// ```
pub fn parse_with<T, F>(lookup: F, key: &str, default: T) -> Result<T, EnvError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse::<T>().map_err(|e| EnvError::Invalid {
                key: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}

/// Read a required variable from `lookup`
pub fn require_with<F>(lookup: F, key: &str) -> Result<String, EnvError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| EnvError::Missing(key.to_string()))
}
