//! Settings loading from `config.toml` and the environment

use serial_test::serial;
use tempfile::TempDir;
use ClubPortal::config::{AdminLoginPolicy, Settings};

const MINIMAL_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 3001

[database]
url = "memory"
max_connections = 5
min_connections = 1

[auth]
identity_url = "http://localhost:54321"
anon_key = "anon"
timeout_seconds = 5
session_ttl_seconds = 3600
admin_login = "allow_list"

[[auth.allowed_admins]]
email = "lead@club.example"
password = "secret"
username = "Club Lead"

[logging]
level = "debug"
file_path = "logs"
"#;

/// Runs `f` with the working directory set to a temp dir holding `config.toml`
fn with_config_dir<T>(contents: &str, f: impl FnOnce() -> T) -> T {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), contents).unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = f();
    std::env::set_current_dir(previous).unwrap();
    result
}

#[test]
#[serial]
fn test_loads_config_file_with_defaults() {
    let settings = with_config_dir(MINIMAL_CONFIG, Settings::new).unwrap();

    assert_eq!(settings.server.port, 3001);
    assert!(settings.server.allowed_origins.is_empty());
    assert_eq!(settings.database.url, "memory");
    assert!(settings.redis.is_none());
    assert_eq!(settings.auth.admin_login, AdminLoginPolicy::AllowList);
    assert_eq!(settings.auth.allowed_admins[0].username, "Club Lead");
    assert_eq!(settings.certificates.date_format, "%B %-d, %Y");
    assert_eq!(settings.rate_limit.login_attempts_per_minute, 5);
    assert!(settings.validate().is_ok());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    std::env::set_var("CLUBPORTAL__SERVER__PORT", "4100");
    let settings = with_config_dir(MINIMAL_CONFIG, Settings::new);
    std::env::remove_var("CLUBPORTAL__SERVER__PORT");

    assert_eq!(settings.unwrap().server.port, 4100);
}

#[test]
#[serial]
fn test_missing_required_section_fails() {
    let without_auth = MINIMAL_CONFIG.replace("[auth]", "[unused]");
    let result = with_config_dir(&without_auth, Settings::new);
    assert!(result.is_err());
}
