use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let gemini_api_key = require("GEMINI_API_KEY")?;

    let env = parse_environment(&or_default("POSTPILOT_ENV", "development"))?;

    let log_level = or_default("POSTPILOT_LOG_LEVEL", "info");
    let profile_path = PathBuf::from(or_default(
        "POSTPILOT_PROFILE_PATH",
        "./config/profile.yaml",
    ));

    let gateway_base_url = or_default(
        "POSTPILOT_GATEWAY_BASE_URL",
        "https://generativelanguage.googleapis.com/",
    );
    let text_model = or_default("POSTPILOT_TEXT_MODEL", "gemini-3-flash-preview");
    let image_model = or_default("POSTPILOT_IMAGE_MODEL", "gemini-3-pro-image-preview");
    let image_aspect_ratio = or_default("POSTPILOT_IMAGE_ASPECT_RATIO", "16:9");

    let request_timeout_secs = parse_u64("POSTPILOT_REQUEST_TIMEOUT_SECS", "60")?;
    let max_retries = parse_u32("POSTPILOT_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("POSTPILOT_RETRY_BACKOFF_BASE_MS", "1000")?;

    let publish_hour = parse_u32("POSTPILOT_PUBLISH_HOUR", "10")?;
    if publish_hour > 23 {
        return Err(ConfigError::InvalidEnvVar {
            var: "POSTPILOT_PUBLISH_HOUR".to_string(),
            reason: format!("hour must be 0..=23, got {publish_hour}"),
        });
    }
    let publish_step_delay_ms = parse_u64("POSTPILOT_PUBLISH_STEP_DELAY_MS", "800")?;
    let publish_settle_delay_ms = parse_u64("POSTPILOT_PUBLISH_SETTLE_DELAY_MS", "1500")?;

    Ok(AppConfig {
        env,
        log_level,
        profile_path,
        gemini_api_key,
        gateway_base_url,
        text_model,
        image_model,
        image_aspect_ratio,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        publish_hour,
        publish_step_delay_ms,
        publish_settle_delay_ms,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "POSTPILOT_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
