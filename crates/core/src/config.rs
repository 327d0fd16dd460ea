use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Process-wide JWT signing secret. Rotating it invalidates every
    /// outstanding token.
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite:sweetshop.db?mode=rwc".to_string()
}

fn default_token_ttl() -> i64 {
    1800 // 30 minutes
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from sweetshop.toml (if present) with environment
    /// variable overrides.
    ///
    /// Environment variables are prefixed with SWEETSHOP_ and use `__` as
    /// the section separator, e.g. SWEETSHOP_DATABASE__URL,
    /// SWEETSHOP_AUTH__JWT_SECRET.
    pub fn load_with_env() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("sweetshop").required(false))
            .add_source(config::Environment::with_prefix("SWEETSHOP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_token_ttl(), 1800);
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 3000);
        assert_eq!(default_database_url(), "sqlite:sweetshop.db?mode=rwc");
    }

    #[test]
    fn test_minimal_config() {
        let config = Config::builder()
            .add_source(config::File::from_str(
                "[database]\nurl = \"sqlite::memory:\"\n[auth]\njwt_secret = \"s\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let app: AppConfig = config.try_deserialize().unwrap();
        assert_eq!(app.database.url, "sqlite::memory:");
        assert_eq!(app.auth.token_ttl_seconds, 1800);
        assert_eq!(app.server.port, 3000);
    }
}
