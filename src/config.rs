//! Runtime configuration resolved from the environment.
//!
//! Base URL precedence: explicit override > `FREIGHT_API_URL` > `API_URL` >
//! local development default.

use std::time::Duration;

use thiserror::Error;

/// Local development backend.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

pub const API_URL_VAR: &str = "FREIGHT_API_URL";
pub const FALLBACK_API_URL_VAR: &str = "API_URL";
pub const TIMEOUT_VAR: &str = "FREIGHT_API_TIMEOUT_SECS";
pub const TOKEN_VAR: &str = "FREIGHT_API_TOKEN";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    /// Request timeout applied by the caller-built HTTP client, if any.
    pub timeout: Option<Duration>,
    /// Token supplied through the environment instead of the keychain.
    pub token: Option<String>,
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn from_env(api_url_override: Option<String>) -> Result<Self, ConfigError> {
        Self::resolve(api_url_override, |name| std::env::var(name).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    pub fn resolve<F>(api_url_override: Option<String>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_base_url = api_url_override
            .filter(|v| !v.trim().is_empty())
            .or_else(|| non_empty(API_URL_VAR))
            .or_else(|| non_empty(FALLBACK_API_URL_VAR))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match non_empty(TIMEOUT_VAR) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidTimeout {
                    var: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_base_url,
            timeout,
            token: non_empty(TOKEN_VAR),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(None, env(&[])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, None);
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_url_precedence() {
        let vars = env(&[(API_URL_VAR, "http://primary"), (FALLBACK_API_URL_VAR, "http://fallback")]);
        assert_eq!(Config::resolve(None, &vars).unwrap().api_base_url, "http://primary");
        assert_eq!(
            Config::resolve(Some("http://flag".into()), &vars).unwrap().api_base_url,
            "http://flag"
        );

        let vars = env(&[(API_URL_VAR, ""), (FALLBACK_API_URL_VAR, "http://fallback")]);
        assert_eq!(Config::resolve(None, vars).unwrap().api_base_url, "http://fallback");
    }

    #[test]
    fn test_timeout_and_token() {
        let config = Config::resolve(None, env(&[(TIMEOUT_VAR, "30"), (TOKEN_VAR, "t1")])).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.token.as_deref(), Some("t1"));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = Config::resolve(None, env(&[(TIMEOUT_VAR, "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidTimeout {
                var: TIMEOUT_VAR,
                value: "soon".into(),
            }
        );
    }
}
