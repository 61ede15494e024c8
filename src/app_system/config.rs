use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::description::DescriptionConfig;

pub const DEFAULT_CUSTOMER_NAME: &str = "Test User";
pub const DEFAULT_INITIAL_BALANCE: f64 = 500.0;
pub const DEFAULT_DELIVERY_FEE: f64 = 15.0;
pub const DEFAULT_ACTOR_BUFFER_SIZE: usize = 32;
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEXT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEXT_API_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// System configuration loaded from environment variables.
///
/// | Env Var                 | Default                                     |
/// |-------------------------|---------------------------------------------|
/// | `CUSTOMER_NAME`         | `Test User`                                 |
/// | `INITIAL_BALANCE`       | `500.0`                                     |
/// | `DELIVERY_FEE`          | `15.0`                                      |
/// | `ACTOR_BUFFER_SIZE`     | `32`                                        |
/// | `API_KEY`               | unset                                       |
/// | `TEXT_MODEL`            | `gemini-2.5-flash`                          |
/// | `TEXT_API_BASE_URL`     | `https://generativelanguage.googleapis.com` |
/// | `TEXT_API_TIMEOUT_SECS` | `10`                                        |
#[derive(Debug, Clone)]
pub struct SystemConfig {
    pub customer_name: String,
    pub initial_balance: f64,
    /// Platform fee recorded on every order and charged at verification.
    pub delivery_fee: f64,
    pub actor_buffer_size: usize,
    pub description: DescriptionConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            customer_name: DEFAULT_CUSTOMER_NAME.to_string(),
            initial_balance: DEFAULT_INITIAL_BALANCE,
            delivery_fee: DEFAULT_DELIVERY_FEE,
            actor_buffer_size: DEFAULT_ACTOR_BUFFER_SIZE,
            description: DescriptionConfig {
                api_key: None,
                model: DEFAULT_TEXT_MODEL.to_string(),
                base_url: DEFAULT_TEXT_API_BASE_URL.to_string(),
                timeout: Duration::from_secs(DEFAULT_TEXT_API_TIMEOUT_SECS),
            },
        }
    }
}

impl SystemConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable source. Unset or blank variables
    /// fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let actor_buffer_size = parse(&get, "ACTOR_BUFFER_SIZE", defaults.actor_buffer_size)?;
        if actor_buffer_size == 0 {
            return Err(ConfigError::Invalid { var: "ACTOR_BUFFER_SIZE", value: "0".to_string() });
        }

        Ok(Self {
            customer_name: get("CUSTOMER_NAME").unwrap_or(defaults.customer_name),
            initial_balance: parse(&get, "INITIAL_BALANCE", defaults.initial_balance)?,
            delivery_fee: parse(&get, "DELIVERY_FEE", defaults.delivery_fee)?,
            actor_buffer_size,
            description: DescriptionConfig {
                api_key: get("API_KEY"),
                model: get("TEXT_MODEL").unwrap_or(defaults.description.model),
                base_url: get("TEXT_API_BASE_URL").unwrap_or(defaults.description.base_url),
                timeout: Duration::from_secs(parse(
                    &get,
                    "TEXT_API_TIMEOUT_SECS",
                    DEFAULT_TEXT_API_TIMEOUT_SECS,
                )?),
            },
        })
    }
}

fn parse<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = SystemConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.customer_name, DEFAULT_CUSTOMER_NAME);
        assert_eq!(config.initial_balance, 500.0);
        assert_eq!(config.delivery_fee, 15.0);
        assert_eq!(config.actor_buffer_size, 32);
        assert_eq!(config.description.api_key, None);
        assert_eq!(config.description.model, DEFAULT_TEXT_MODEL);
    }

    #[test]
    fn reads_overrides() {
        let config = SystemConfig::from_lookup(lookup(&[
            ("INITIAL_BALANCE", "120.5"),
            ("DELIVERY_FEE", " 8 "),
            ("API_KEY", "secret"),
            ("TEXT_API_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.initial_balance, 120.5);
        assert_eq!(config.delivery_fee, 8.0);
        assert_eq!(config.description.api_key.as_deref(), Some("secret"));
        assert_eq!(config.description.timeout, Duration::from_secs(3));
    }

    #[test]
    fn blank_api_key_counts_as_unset() {
        let config = SystemConfig::from_lookup(lookup(&[("API_KEY", "  ")])).unwrap();
        assert_eq!(config.description.api_key, None);
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let result = SystemConfig::from_lookup(lookup(&[("ACTOR_BUFFER_SIZE", "lots")]));
        assert_eq!(
            result.unwrap_err(),
            ConfigError::Invalid { var: "ACTOR_BUFFER_SIZE", value: "lots".to_string() }
        );

        // mpsc channels need a non-zero capacity
        let result = SystemConfig::from_lookup(lookup(&[("ACTOR_BUFFER_SIZE", "0")]));
        assert!(result.is_err());
    }
}
