//! # Configuration
//!
//! Server settings come from the environment:
//!
//! | variable  | required | default       |
//! |-----------|----------|---------------|
//! | `PORT`    | yes      |               |
//! | `API_HOST`| no       | `0.0.0.0`     |
//! | `API_ENV` | no       | `development` |
//!
//! [`ServerConfig::from_lookup`] takes any lookup function, so tests never have
//! to touch the process environment.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("PORT must be a positive integer, got {0:?}")]
    InvalidPort(String),

    #[error("API_HOST must be an IP address, got {0:?}")]
    InvalidHost(String),

    #[error("API_ENV must be `development` or `production`, got {0:?}")]
    InvalidEnvironment(String),
}

/// Deployment environment. Controls the log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub environment: Environment,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT").ok_or(ConfigError::Missing("PORT"))?;
        let port = match port.trim().parse::<u16>() {
            Ok(port) if port > 0 => port,
            _ => return Err(ConfigError::InvalidPort(port)),
        };

        let host = match lookup("API_HOST") {
            Some(host) => host
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost(host))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let environment = match lookup("API_ENV") {
            Some(env) => env.trim().parse::<Environment>()?,
            None => Environment::default(),
        };

        Ok(Self {
            host,
            port,
            environment,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServerConfig({}, {})", self.addr(), self.environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "3000")])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_all_variables() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("API_HOST", "127.0.0.1"),
            ("API_ENV", "Production"),
        ]))
        .unwrap();
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(
            config.to_string(),
            "ServerConfig(127.0.0.1:8080, production)"
        );
    }

    #[test]
    fn test_port_is_required_and_positive() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::Missing("PORT")
        );
        for bad in ["0", "-1", "abc", "70000", ""] {
            assert_eq!(
                ServerConfig::from_lookup(lookup(&[("PORT", bad)])).unwrap_err(),
                ConfigError::InvalidPort(bad.to_string())
            );
        }
    }

    #[test]
    fn test_invalid_host_and_environment() {
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[("PORT", "1"), ("API_HOST", "localhost")])),
            Err(ConfigError::InvalidHost(_))
        ));
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[("PORT", "1"), ("API_ENV", "staging")])),
            Err(ConfigError::InvalidEnvironment(_))
        ));
    }
}
