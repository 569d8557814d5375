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
    m.insert("GEMINI_API_KEY", "test-key");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "PHARMATRACK_ENV"));
}

#[test]
fn build_app_config_fails_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GEMINI_API_KEY"),
        "expected MissingEnvVar(GEMINI_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map = full_env();
    map.insert("GEMINI_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GEMINI_API_KEY"),
        "expected MissingEnvVar(GEMINI_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.gemini_api_key, "test-key");
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.gemini_model, "gemini-3-pro-preview");
    assert_eq!(
        cfg.gemini_base_url,
        "https://generativelanguage.googleapis.com/"
    );
    assert_eq!(cfg.gemini_timeout_secs, 120);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("PHARMATRACK_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PHARMATRACK_BIND_ADDR"),
        "expected InvalidEnvVar(PHARMATRACK_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_env() {
    let mut map = full_env();
    map.insert("PHARMATRACK_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PHARMATRACK_ENV"),
        "expected InvalidEnvVar(PHARMATRACK_ENV), got: {result:?}"
    );
}

#[test]
fn gemini_model_override() {
    let mut map = full_env();
    map.insert("PHARMATRACK_GEMINI_MODEL", "gemini-2.5-flash");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.gemini_model, "gemini-2.5-flash");
}

#[test]
fn gemini_timeout_secs_override() {
    let mut map = full_env();
    map.insert("PHARMATRACK_GEMINI_TIMEOUT_SECS", "45");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.gemini_timeout_secs, 45);
}

#[test]
fn gemini_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("PHARMATRACK_GEMINI_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PHARMATRACK_GEMINI_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PHARMATRACK_GEMINI_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn gemini_timeout_secs_zero_rejected() {
    let mut map = full_env();
    map.insert("PHARMATRACK_GEMINI_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PHARMATRACK_GEMINI_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PHARMATRACK_GEMINI_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = full_env();
    map.insert("GEMINI_API_KEY", "super-secret-value");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret-value"));
    assert!(rendered.contains("[redacted]"));
}
