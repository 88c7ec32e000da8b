use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("CANOPY_API_BASE_URL", "http://localhost:3000");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "CANOPY_ENV"));
}

#[test]
fn build_app_config_fails_without_api_base_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "CANOPY_API_BASE_URL"),
        "expected MissingEnvVar(CANOPY_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_base_url_as_missing() {
    let mut map = HashMap::new();
    map.insert("CANOPY_API_BASE_URL", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = HashMap::new();
    map.insert("CANOPY_API_BASE_URL", "ftp://shop.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CANOPY_API_BASE_URL"),
        "expected InvalidEnvVar(CANOPY_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("config should load");
    assert_eq!(cfg.api_base_url, "http://localhost:3000");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.http_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "canopy/0.1 (storefront-admin)");
    assert_eq!(cfg.shop_close_delay_ms, 1200);
    assert_eq!(cfg.cart_close_delay_ms, 500);
    assert_eq!(cfg.chat_reply_delay_ms, 1500);
    assert_eq!(cfg.shop_close_delay().as_millis(), 1200);
    assert_eq!(cfg.cart_close_delay().as_millis(), 500);
    assert_eq!(cfg.chat_reply_delay().as_millis(), 1500);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("CANOPY_ENV", "production");
    map.insert("CANOPY_LOG_LEVEL", "debug");
    map.insert("CANOPY_HTTP_TIMEOUT_SECS", "5");
    map.insert("CANOPY_SHOP_CLOSE_DELAY_MS", "900");
    map.insert("CANOPY_CART_CLOSE_DELAY_MS", "350");
    map.insert("CANOPY_CHAT_REPLY_DELAY_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).expect("config should load");
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.http_timeout_secs, 5);
    assert_eq!(cfg.shop_close_delay_ms, 900);
    assert_eq!(cfg.cart_close_delay_ms, 350);
    assert_eq!(cfg.chat_reply_delay_ms, 0);
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = full_env();
    map.insert("CANOPY_HTTP_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CANOPY_HTTP_TIMEOUT_SECS"),
        "expected InvalidEnvVar(CANOPY_HTTP_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_menu_delay() {
    let mut map = full_env();
    map.insert("CANOPY_CART_CLOSE_DELAY_MS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CANOPY_CART_CLOSE_DELAY_MS"),
        "expected InvalidEnvVar(CANOPY_CART_CLOSE_DELAY_MS), got: {result:?}"
    );
}
