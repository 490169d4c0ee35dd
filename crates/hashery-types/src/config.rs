//! Service configuration types for Hashery.
//!
//! `ServiceConfig` represents the `config.toml` that controls the listen
//! address, how `POST /hash` responds, the enforced minimum latency, and the
//! shutdown grace period. All fields have defaults.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Top-level configuration for the hashing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// How `POST /hash` answers the caller.
    #[serde(default)]
    pub mode: SubmitMode,

    /// Minimum time between submission and the digest becoming visible.
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    /// How long in-flight completions may keep running once draining starts.
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_min_delay_ms() -> u64 {
    5_000
}

fn default_shutdown_grace_secs() -> u64 {
    30
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            mode: SubmitMode::default(),
            min_delay_ms: default_min_delay_ms(),
            shutdown_grace_secs: default_shutdown_grace_secs(),
        }
    }
}

impl ServiceConfig {
    /// Minimum delay as a `Duration`.
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    /// Shutdown grace period as a `Duration`.
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }

    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reject configurations the server cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Response behaviour of `POST /hash`.
///
/// - Deferred: return the identifier at once, finish in the background
/// - Blocking: wait out the minimum delay and return the digest
/// - Streaming: write the identifier line, then the digest on the same body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitMode {
    #[default]
    Deferred,
    Blocking,
    Streaming,
}

impl fmt::Display for SubmitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitMode::Deferred => write!(f, "deferred"),
            SubmitMode::Blocking => write!(f, "blocking"),
            SubmitMode::Streaming => write!(f, "streaming"),
        }
    }
}

impl FromStr for SubmitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deferred" => Ok(SubmitMode::Deferred),
            "blocking" => Ok(SubmitMode::Blocking),
            "streaming" => Ok(SubmitMode::Streaming),
            other => Err(format!("invalid submit mode: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_default_values() {
        let config = ServiceConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.mode, SubmitMode::Deferred);
        assert_eq!(config.min_delay(), Duration::from_secs(5));
        assert_eq!(config.shutdown_grace(), Duration::from_secs(30));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_service_config_deserialize_with_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_service_config_deserialize_with_values() {
        let toml_str = r#"
host = "0.0.0.0"
port = 9000
mode = "streaming"
min_delay_ms = 250
shutdown_grace_secs = 5
"#;
        let config: ServiceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.mode, SubmitMode::Streaming);
        assert_eq!(config.min_delay(), Duration::from_millis(250));
        assert_eq!(config.shutdown_grace(), Duration::from_secs(5));
    }

    #[test]
    fn test_service_config_rejects_unknown_mode() {
        let result: Result<ServiceConfig, _> = toml::from_str(r#"mode = "eventually""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_blank_host() {
        let config = ServiceConfig {
            host: "  ".to_string(),
            ..ServiceConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(ServiceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_submit_mode_display_and_parse() {
        for mode in [SubmitMode::Deferred, SubmitMode::Blocking, SubmitMode::Streaming] {
            assert_eq!(mode.to_string().parse::<SubmitMode>().unwrap(), mode);
        }
        assert_eq!("BLOCKING".parse::<SubmitMode>().unwrap(), SubmitMode::Blocking);
        assert!("later".parse::<SubmitMode>().is_err());
    }
}
