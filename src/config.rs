//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Production mode hides internal error details from responses
    pub production: bool,
    /// Delay applied before answering task listings, in milliseconds
    pub list_delay_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 5000)
    /// - `APP_ENV` - `production` enables production mode (default: development)
    /// - `LIST_DELAY_MS` - Listing delay in milliseconds (default: 0)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            production: env::var("APP_ENV")
                .map(|v| v == "production")
                .unwrap_or(false),
            list_delay_ms: env::var("LIST_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }

    pub fn list_delay(&self) -> Duration {
        Duration::from_millis(self.list_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5000,
            production: false,
            list_delay_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 5000);
        assert!(!config.production);
        assert_eq!(config.list_delay(), Duration::ZERO);
    }

    #[test]
    fn test_config_from_env() {
        // Single test so the env mutations never race each other
        env::remove_var("SERVER_PORT");
        env::remove_var("APP_ENV");
        env::remove_var("LIST_DELAY_MS");
        assert_eq!(Config::from_env(), Config::default());

        env::set_var("SERVER_PORT", "8081");
        env::set_var("APP_ENV", "production");
        env::set_var("LIST_DELAY_MS", "not-a-number");
        let config = Config::from_env();
        assert_eq!(config.server_port, 8081);
        assert!(config.production);
        assert_eq!(config.list_delay_ms, 0);

        env::remove_var("SERVER_PORT");
        env::remove_var("APP_ENV");
        env::remove_var("LIST_DELAY_MS");
    }
}
