use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let log_level = or_default("CRYPTOPULSE_LOG_LEVEL", "info");
    let twitter_bearer_token = optional("TWITTER_BEARER_TOKEN");
    let accounts_path = optional("CRYPTOPULSE_ACCOUNTS_PATH").map(PathBuf::from);
    let lexicon_path = optional("CRYPTOPULSE_LEXICON_PATH").map(PathBuf::from);
    let output_path = PathBuf::from(or_default(
        "CRYPTOPULSE_OUTPUT_PATH",
        "crypto_sentiment_results.csv",
    ));

    let max_results: u32 = parse_as(
        "CRYPTOPULSE_MAX_RESULTS",
        &or_default("CRYPTOPULSE_MAX_RESULTS", "10"),
    )?;
    if max_results == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CRYPTOPULSE_MAX_RESULTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let min_text_length = parse_as(
        "CRYPTOPULSE_MIN_TEXT_LENGTH",
        &or_default("CRYPTOPULSE_MIN_TEXT_LENGTH", "10"),
    )?;
    let request_timeout_secs = parse_as(
        "CRYPTOPULSE_REQUEST_TIMEOUT_SECS",
        &or_default("CRYPTOPULSE_REQUEST_TIMEOUT_SECS", "30"),
    )?;
    let lookup_delay_ms = parse_as(
        "CRYPTOPULSE_LOOKUP_DELAY_MS",
        &or_default("CRYPTOPULSE_LOOKUP_DELAY_MS", "1000"),
    )?;
    let fetch_delay_ms = parse_as(
        "CRYPTOPULSE_FETCH_DELAY_MS",
        &or_default("CRYPTOPULSE_FETCH_DELAY_MS", "2000"),
    )?;
    let max_retries = parse_as(
        "CRYPTOPULSE_MAX_RETRIES",
        &or_default("CRYPTOPULSE_MAX_RETRIES", "3"),
    )?;
    let retry_backoff_base_ms = parse_as(
        "CRYPTOPULSE_RETRY_BACKOFF_BASE_MS",
        &or_default("CRYPTOPULSE_RETRY_BACKOFF_BASE_MS", "1000"),
    )?;

    Ok(AppConfig {
        log_level,
        twitter_bearer_token,
        accounts_path,
        lexicon_path,
        output_path,
        max_results,
        min_text_length,
        request_timeout_secs,
        lookup_delay_ms,
        fetch_delay_ms,
        max_retries,
        retry_backoff_base_ms,
    })
}

fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}
