use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::session::models::TokenLifetimes;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of tokens issued at login; absent means no expiry
    #[serde(default)]
    pub access_token_ttl_secs: Option<i64>,
    pub refresh_token_ttl_secs: i64,
    pub revoke_token_ttl_secs: i64,
}

impl JwtConfig {
    pub fn lifetimes(&self) -> TokenLifetimes {
        TokenLifetimes {
            access: self.access_token_ttl_secs.map(Duration::seconds),
            refresh: Duration::seconds(self.refresh_token_ttl_secs),
            revoke: Duration::seconds(self.revoke_token_ttl_secs),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CacheConfig {
    /// Redis connection URL; the in-process cache is used when absent
    pub url: Option<String>,
    pub ttl_secs: Option<u64>,
    /// Drop every cached entry once at startup
    #[serde(default)]
    pub reset_on_start: bool,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, CACHE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetimes_from_seconds() {
        let jwt = JwtConfig {
            secret: "secret".to_string(),
            access_token_ttl_secs: None,
            refresh_token_ttl_secs: 3600,
            revoke_token_ttl_secs: 1,
        };

        let lifetimes = jwt.lifetimes();
        assert!(lifetimes.access.is_none());
        assert_eq!(lifetimes.refresh, Duration::hours(1));
        assert_eq!(lifetimes.revoke, Duration::seconds(1));
    }
}
