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

/// Returns a map with all required env vars populated.
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
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "POSTPILOT_ENV"));
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
    let mut map: HashMap<&str, &str> = HashMap::new();
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
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.profile_path.to_string_lossy(),
        "./config/profile.yaml"
    );
    assert_eq!(
        cfg.gateway_base_url,
        "https://generativelanguage.googleapis.com/"
    );
    assert_eq!(cfg.text_model, "gemini-3-flash-preview");
    assert_eq!(cfg.image_model, "gemini-3-pro-image-preview");
    assert_eq!(cfg.image_aspect_ratio, "16:9");
    assert_eq!(cfg.request_timeout_secs, 60);
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_ms, 1000);
    assert_eq!(cfg.publish_hour, 10);
    assert_eq!(cfg.publish_step_delay_ms, 800);
    assert_eq!(cfg.publish_settle_delay_ms, 1500);
}

#[test]
fn build_app_config_applies_overrides() {
    let mut map = full_env();
    map.insert("POSTPILOT_ENV", "production");
    map.insert("POSTPILOT_TEXT_MODEL", "gemini-2.5-flash");
    map.insert("POSTPILOT_MAX_RETRIES", "0");
    map.insert("POSTPILOT_PUBLISH_HOUR", "8");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.text_model, "gemini-2.5-flash");
    assert_eq!(cfg.max_retries, 0);
    assert_eq!(cfg.publish_hour, 8);
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = full_env();
    map.insert("POSTPILOT_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "POSTPILOT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(POSTPILOT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_out_of_range_publish_hour() {
    let mut map = full_env();
    map.insert("POSTPILOT_PUBLISH_HOUR", "24");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "POSTPILOT_PUBLISH_HOUR"),
        "expected InvalidEnvVar(POSTPILOT_PUBLISH_HOUR), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_step_delay() {
    let mut map = full_env();
    map.insert("POSTPILOT_PUBLISH_STEP_DELAY_MS", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "POSTPILOT_PUBLISH_STEP_DELAY_MS"),
        "expected InvalidEnvVar(POSTPILOT_PUBLISH_STEP_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(rendered.contains("[redacted]"));
    assert!(!rendered.contains("test-key"));
}
