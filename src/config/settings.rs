//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub redis: Option<RedisConfig>,
    pub auth: AuthConfig,
    #[serde(default)]
    pub certificates: CertificateConfig,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration, used for session storage
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
}

/// Which check decides that a login may enter the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminLoginPolicy {
    /// Authenticate remotely, then require the `admin` role in `user_roles`
    RoleTable,
    /// Match against `auth.allowed_admins` and issue a local admin identity
    AllowList,
}

/// Statically configured admin account for the allow-list policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AllowedAdmin {
    pub email: String,
    pub password: String,
    pub username: String,
}

/// Identity service and session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Base URL of the hosted backend, e.g. `https://xyz.supabase.co`
    pub identity_url: String,
    pub anon_key: String,
    pub timeout_seconds: u64,
    pub session_ttl_seconds: u64,
    pub admin_login: AdminLoginPolicy,
    #[serde(default)]
    pub allowed_admins: Vec<AllowedAdmin>,
}

/// Certificate issuance configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CertificateConfig {
    /// Display format for certificate dates (chrono strftime)
    pub date_format: String,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            date_format: "%B %-d, %Y".to_string(),
        }
    }
}

/// Login throttling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitSettings {
    pub login_attempts_per_minute: u32,
    pub login_burst: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            login_attempts_per_minute: 5,
            login_burst: 3,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("CLUBPORTAL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ClubPortalError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3001,
                allowed_origins: vec!["http://localhost:5173".to_string()],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/clubportal".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            redis: None,
            auth: AuthConfig {
                identity_url: "http://localhost:54321".to_string(),
                anon_key: String::new(),
                timeout_seconds: 10,
                session_ttl_seconds: 60 * 60 * 24,
                admin_login: AdminLoginPolicy::RoleTable,
                allowed_admins: vec![],
            },
            certificates: CertificateConfig::default(),
            rate_limit: RateLimitSettings::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
        }
    }
}
