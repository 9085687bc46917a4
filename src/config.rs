//! Application configuration
//!
//! Loaded from a TOML file (`~/.config/hotel-reservation/config.toml` by
//! default). Every section and field is optional; a missing file yields the
//! defaults. A few environment variables override the file afterwards.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::{CacheKeys, CacheTtls};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::crypto::password::DEFAULT_COST;
use crate::infrastructure::DatabaseConfig;

pub const APP_DIR_NAME: &str = "hotel-reservation";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// `<config_dir>/hotel-reservation/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub cache: CacheSection,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds
    pub connect_timeout: u64,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let defaults = DatabaseConfig::default();
        Self {
            url: defaults.url,
            max_connections: defaults.max_connections,
            min_connections: defaults.min_connections,
            connect_timeout: defaults.connect_timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSection {
    /// `redis://host:6379/0`. Unset: in-process cache.
    pub redis_url: Option<String>,
    pub key_prefix: String,
    pub hotel_ttl: u64,
    pub hotel_rooms_ttl: u64,
    pub hotel_list_ttl: u64,
    pub booking_ttl: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        let ttls = CacheTtls::default();
        Self {
            redis_url: None,
            key_prefix: "hotel-reservation:".to_string(),
            hotel_ttl: ttls.hotel.as_secs(),
            hotel_rooms_ttl: ttls.hotel_rooms.as_secs(),
            hotel_list_ttl: ttls.hotel_list.as_secs(),
            booking_ttl: ttls.booking.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_hours: 4,
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `RUST_LOG` takes precedence when set
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Administrator created on start-up when the user table is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            first_name: "Admin".to_string(),
            last_name: "Admin".to_string(),
            email: "admin@admin.com".to_string(),
            password: "admin_admin".to_string(),
        }
    }
}

impl AppConfig {
    /// Read `path` and apply environment overrides. A missing file is not
    /// an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// `DATABASE_URL`, `REDIS_URL`, `JWT_SECRET`, `HTTP_LISTEN_ADDRESS`.
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(url) = get("REDIS_URL") {
            self.cache.redis_url = Some(url);
        }
        if let Some(secret) = get("JWT_SECRET") {
            self.security.jwt_secret = secret;
        }
        if let Some(addr) = get("HTTP_LISTEN_ADDRESS") {
            let (host, port) = parse_listen_address(&addr)?;
            if !host.is_empty() {
                self.server.host = host;
            }
            self.server.port = port;
        }
        Ok(())
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            min_connections: self.database.min_connections,
            connect_timeout: Duration::from_secs(self.database.connect_timeout),
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::new(
            self.security.jwt_secret.clone(),
            self.security.jwt_expiration_hours,
        )
    }

    pub fn cache_keys(&self) -> CacheKeys {
        CacheKeys::new(self.cache.key_prefix.clone())
    }

    pub fn cache_ttls(&self) -> CacheTtls {
        CacheTtls {
            hotel: Duration::from_secs(self.cache.hotel_ttl),
            hotel_rooms: Duration::from_secs(self.cache.hotel_rooms_ttl),
            hotel_list: Duration::from_secs(self.cache.hotel_list_ttl),
            booking: Duration::from_secs(self.cache.booking_ttl),
        }
    }
}

/// `host:port` or `:port` (all interfaces).
fn parse_listen_address(addr: &str) -> Result<(String, u16), ConfigError> {
    let invalid = |message: String| ConfigError::Invalid {
        key: "HTTP_LISTEN_ADDRESS",
        message,
    };

    let (host, port) = addr
        .trim()
        .rsplit_once(':')
        .ok_or_else(|| invalid(format!("expected host:port, got '{addr}'")))?;
    let port = port
        .parse::<u16>()
        .map_err(|e| invalid(format!("bad port '{port}': {e}")))?;
    Ok((host.to_string(), port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.security.jwt_expiration_hours, 4);
        assert_eq!(cfg.cache.hotel_list_ttl, 30);
        assert!(cfg.cache.redis_url.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 8080

            [cache]
            redis_url = "redis://localhost:6379"
            hotel_ttl = 10
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.cache.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert_eq!(cfg.cache_ttls().hotel, Duration::from_secs(10));
        assert_eq!(cfg.cache_ttls().booking, Duration::from_secs(60));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(AppConfig::from_toml("[server\nport = ").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("hotel-missing-{}.toml", uuid::Uuid::new_v4()));
        assert!(AppConfig::load(&path).is_ok());
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DATABASE_URL", "sqlite::memory:"),
            ("REDIS_URL", "redis://cache:6379"),
            ("JWT_SECRET", "s3cret"),
            ("HTTP_LISTEN_ADDRESS", ":4000"),
        ]);
        let mut cfg = AppConfig::default();
        cfg.apply_overrides(|k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.cache.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(cfg.jwt_config().secret, "s3cret");
        assert_eq!(cfg.listen_address(), "0.0.0.0:4000");
    }

    #[test]
    fn bad_listen_address_is_rejected() {
        let mut cfg = AppConfig::default();
        let err = cfg
            .apply_overrides(|k| (k == "HTTP_LISTEN_ADDRESS").then(|| "localhost".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "HTTP_LISTEN_ADDRESS", .. }));
    }
}
