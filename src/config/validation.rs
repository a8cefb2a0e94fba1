//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{ClubPortalError, Result};
use super::{AdminLoginPolicy, Settings};

/// Longest accepted session lifetime
pub const MAX_SESSION_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_certificate_config(&settings.certificates)?;
    validate_rate_limit_config(&settings.rate_limit)?;
    validate_logging_config(&settings.logging)?;

    if let Some(ref redis_config) = settings.redis {
        validate_redis_config(redis_config)?;
    }

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(ClubPortalError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(ClubPortalError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(ClubPortalError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(ClubPortalError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(ClubPortalError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(ClubPortalError::Config(
            "Redis URL is required".to_string()
        ));
    }

    Ok(())
}

/// Validate identity service and login policy configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.identity_url.is_empty() {
        return Err(ClubPortalError::Config(
            "Identity service URL is required".to_string()
        ));
    }

    url::Url::parse(&config.identity_url)
        .map_err(|e| ClubPortalError::Config(format!("Invalid identity service URL: {}", e)))?;

    if config.anon_key.is_empty() {
        return Err(ClubPortalError::Config(
            "Identity service anon key is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(ClubPortalError::Config(
            "Identity service timeout must be greater than 0".to_string()
        ));
    }

    if config.session_ttl_seconds == 0 {
        return Err(ClubPortalError::Config(
            "Session TTL must be greater than 0".to_string()
        ));
    }

    if config.session_ttl_seconds > MAX_SESSION_TTL_SECONDS {
        return Err(ClubPortalError::Config(
            format!("Session TTL cannot exceed {} seconds", MAX_SESSION_TTL_SECONDS)
        ));
    }

    if config.admin_login == AdminLoginPolicy::AllowList {
        if config.allowed_admins.is_empty() {
            return Err(ClubPortalError::Config(
                "The allow_list admin login policy requires at least one allowed admin".to_string()
            ));
        }

        if let Some(admin) = config.allowed_admins.iter().find(|a| a.email.trim().is_empty() || a.password.is_empty()) {
            return Err(ClubPortalError::Config(
                format!("Allowed admin '{}' needs both an email and a password", admin.username)
            ));
        }
    }

    Ok(())
}

/// Validate certificate configuration
fn validate_certificate_config(config: &super::CertificateConfig) -> Result<()> {
    if config.date_format.is_empty() {
        return Err(ClubPortalError::Config(
            "Certificate date format is required".to_string()
        ));
    }

    Ok(())
}

/// Validate rate limit configuration
fn validate_rate_limit_config(config: &super::RateLimitSettings) -> Result<()> {
    if config.login_attempts_per_minute == 0 {
        return Err(ClubPortalError::Config(
            "Login attempts per minute must be greater than 0".to_string()
        ));
    }

    if config.login_burst == 0 {
        return Err(ClubPortalError::Config(
            "Login burst must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ClubPortalError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ClubPortalError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AllowedAdmin;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.anon_key = "anon".to_string();
        settings
    }

    #[test]
    fn test_default_settings_with_key_are_valid() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_anon_key_is_rejected() {
        let settings = Settings::default();
        assert!(matches!(validate_settings(&settings), Err(ClubPortalError::Config(_))));
    }

    #[test]
    fn test_allow_list_requires_admins() {
        let mut settings = valid_settings();
        settings.auth.admin_login = AdminLoginPolicy::AllowList;
        assert!(validate_settings(&settings).is_err());

        settings.auth.allowed_admins.push(AllowedAdmin {
            email: "lead@club.example".to_string(),
            password: "secret".to_string(),
            username: "Lead".to_string(),
        });
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_session_ttl_bounds() {
        let mut settings = valid_settings();
        settings.auth.session_ttl_seconds = MAX_SESSION_TTL_SECONDS;
        assert!(validate_settings(&settings).is_ok());

        settings.auth.session_ttl_seconds = 10_000_000_000_000;
        assert!(matches!(validate_settings(&settings), Err(ClubPortalError::Config(_))));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_connection_bounds() {
        let mut settings = valid_settings();
        settings.database.min_connections = 20;
        assert!(validate_settings(&settings).is_err());
    }
}
