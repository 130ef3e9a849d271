//! Environment configuration
//!
//! All configuration comes from the environment; there is no config file.

use std::env;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string.
    pub database_url: String,
    /// Results page the scraper pulls finished matches from.
    pub scraper_url: String,
    /// Host the API server binds to.
    pub host: String,
    /// Port the API server binds to.
    pub port: u16,
}

impl Config {
    /// Load the configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let scraper_url = required("SCRAPER_URL")?;
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = match env::var("PORT") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidVar {
                name: "PORT",
                value: value.clone(),
            })?,
            Err(_) => 8080,
        };

        Ok(Self {
            database_url,
            scraper_url,
            host,
            port,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test, run in sequence: the process environment is shared.
    #[test]
    fn reads_the_environment() {
        env::remove_var("DATABASE_URL");
        env::remove_var("SCRAPER_URL");
        env::remove_var("HOST");
        env::remove_var("PORT");

        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingVar("DATABASE_URL"))
        ));

        env::set_var("DATABASE_URL", "postgres://localhost/scoreline");
        env::set_var("SCRAPER_URL", "https://example.org/results");

        let config = Config::from_env().unwrap();
        assert_eq!(config.database_url, "postgres://localhost/scoreline");
        assert_eq!(config.scraper_url, "https://example.org/results");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);

        env::set_var("PORT", "9090");
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 9090);

        env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidVar { name: "PORT", .. })
        ));

        env::remove_var("DATABASE_URL");
        env::remove_var("SCRAPER_URL");
        env::remove_var("PORT");
    }
}
