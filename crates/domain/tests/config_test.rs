use spf_flattener_domain::{CliOverrides, Config, ConfigError};
use std::net::SocketAddr;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.resolver.server, "8.8.8.8");
    assert_eq!(config.resolver.port, 53);
    assert_eq!(config.expansion.max_depth, 5);
    assert_eq!(config.logging.level, "warn");
    assert!(config.resolver.tcp_fallback);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_uses_defaults() {
    let config = Config::from_toml(
        r#"
        [resolver]
        server = "1.1.1.1"

        [expansion]
        max_depth = 3
        "#,
    )
    .unwrap();

    assert_eq!(config.resolver.server, "1.1.1.1");
    assert_eq!(config.resolver.timeout_ms, 2000);
    assert_eq!(config.expansion.max_depth, 3);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_invalid_toml() {
    let result = Config::from_toml("[resolver\nserver = ");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_missing_config_file() {
    let result = Config::load(Some("/nonexistent/spf-flattener.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead { .. })));
}

#[test]
fn test_cli_overrides_win() {
    let config = Config::load(
        None,
        CliOverrides {
            dns_server: Some("9.9.9.9:5353".to_string()),
            max_depth: Some(2),
            timeout_ms: Some(500),
            debug: true,
        },
    )
    .unwrap();

    assert_eq!(config.expansion.max_depth, 2);
    assert_eq!(config.resolver.timeout_ms, 500);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        config.resolver.socket_addr().unwrap(),
        "9.9.9.9:5353".parse::<SocketAddr>().unwrap()
    );
}

#[test]
fn test_socket_addr_forms() {
    let mut config = Config::default();
    assert_eq!(
        config.resolver.socket_addr().unwrap(),
        "8.8.8.8:53".parse::<SocketAddr>().unwrap()
    );

    config.resolver.server = "2001:4860:4860::8888".to_string();
    assert_eq!(
        config.resolver.socket_addr().unwrap(),
        "[2001:4860:4860::8888]:53".parse::<SocketAddr>().unwrap()
    );

    config.resolver.server = "dns.google".to_string();
    assert!(matches!(
        config.resolver.socket_addr(),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn test_validate_rejects_bad_values() {
    let mut config = Config::default();
    config.resolver.timeout_ms = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_accepts_deep_expansion() {
    let mut config = Config::default();
    config.expansion.max_depth = 30;
    assert!(config.validate().is_ok());
}
