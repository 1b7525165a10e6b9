//! Server configuration from environment variables.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5000;

/// Errors from reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an IP address, got {value:?}")]
    InvalidHost { var: &'static str, value: String },

    #[error("{var} must be a port number, got {value:?}")]
    InvalidPort { var: &'static str, value: String },

    #[error("{var} is set but empty")]
    Empty { var: &'static str },
}

/// Settings for the server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// JSON file the local store is persisted to
    pub snapshot_path: Option<PathBuf>,
    /// Remote API to store brevets in instead of the local store
    pub api_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            static_dir: PathBuf::from("static"),
            snapshot_path: None,
            api_url: None,
        }
    }
}

impl ServerConfig {
    pub const HOST_VAR: &'static str = "BREVETS_HOST";
    pub const PORT_VAR: &'static str = "PORT";
    pub const STATIC_DIR_VAR: &'static str = "STATIC_DIR";
    pub const SNAPSHOT_VAR: &'static str = "BREVETS_SNAPSHOT";
    pub const API_URL_VAR: &'static str = "API_URL";

    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable lookup; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(Self::HOST_VAR) {
            let host: IpAddr = value.trim().parse().map_err(|_| ConfigError::InvalidHost {
                var: Self::HOST_VAR,
                value: value.clone(),
            })?;
            config.bind_addr.set_ip(host);
        }

        if let Some(value) = lookup(Self::PORT_VAR) {
            let port: u16 = value.trim().parse().map_err(|_| ConfigError::InvalidPort {
                var: Self::PORT_VAR,
                value: value.clone(),
            })?;
            config.bind_addr.set_port(port);
        }

        if let Some(value) = lookup(Self::STATIC_DIR_VAR) {
            config.static_dir = PathBuf::from(non_empty(Self::STATIC_DIR_VAR, value)?);
        }

        if let Some(value) = lookup(Self::SNAPSHOT_VAR) {
            config.snapshot_path = Some(PathBuf::from(non_empty(Self::SNAPSHOT_VAR, value)?));
        }

        if let Some(value) = lookup(Self::API_URL_VAR) {
            config.api_url = Some(non_empty(Self::API_URL_VAR, value)?);
        }

        Ok(config)
    }
}

fn non_empty(var: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ConfigError::Empty { var })
    } else {
        Ok(trimmed.to_string())
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
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:5000");
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn reads_every_variable() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("BREVETS_HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("STATIC_DIR", "/srv/static"),
            ("BREVETS_SNAPSHOT", "/var/lib/brevets.json"),
            ("API_URL", "http://api:5000"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(
            config.snapshot_path,
            Some(PathBuf::from("/var/lib/brevets.json"))
        );
        assert_eq!(config.api_url.as_deref(), Some("http://api:5000"));
    }

    #[test]
    fn ipv6_host() {
        let config = ServerConfig::from_lookup(lookup(&[("BREVETS_HOST", "::1")])).unwrap();
        assert_eq!(config.bind_addr.to_string(), "[::1]:5000");
    }

    #[test]
    fn rejects_bad_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPort {
                var: "PORT",
                value: "http".into()
            }
        );
        assert!(ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn rejects_bad_host() {
        let err = ServerConfig::from_lookup(lookup(&[("BREVETS_HOST", "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHost { .. }));
    }

    #[test]
    fn rejects_empty_api_url() {
        let err = ServerConfig::from_lookup(lookup(&[("API_URL", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Empty { var: "API_URL" });
        assert_eq!(err.to_string(), "API_URL is set but empty");
    }
}
