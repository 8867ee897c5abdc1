use std::net::SocketAddr;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_CHANNEL_ID: &str = "UCjXPeBJ0L57q7548RtW99Fg";
pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

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

/// Parsing and validation over an arbitrary lookup, so tests can feed a
/// `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let var_or = |var: &str, default: &str| -> ParsedVar {
        ParsedVar {
            var: var.to_string(),
            raw: or_default(var, default),
        }
    };

    let youtube_api_key = require("YOUTUBE_API_KEY")?;

    let env = parse_environment(&or_default("FLOCKSTAT_ENV", "development"))?;
    let bind_addr: SocketAddr = var_or("FLOCKSTAT_BIND_ADDR", "127.0.0.1:8000").parse()?;
    let log_level = or_default("FLOCKSTAT_LOG_LEVEL", "info");

    let channel_id = or_default("FLOCKSTAT_CHANNEL_ID", DEFAULT_CHANNEL_ID);
    let youtube_base_url = or_default("FLOCKSTAT_YOUTUBE_BASE_URL", DEFAULT_YOUTUBE_BASE_URL);

    let max_videos: usize = var_or("FLOCKSTAT_MAX_VIDEOS", "400").parse()?;
    if max_videos == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FLOCKSTAT_MAX_VIDEOS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let youtube_timeout_secs: u64 = var_or("FLOCKSTAT_YOUTUBE_TIMEOUT_SECS", "20").parse()?;
    let youtube_max_retries: u32 = var_or("FLOCKSTAT_YOUTUBE_MAX_RETRIES", "0").parse()?;
    let youtube_backoff_base_ms: u64 =
        var_or("FLOCKSTAT_YOUTUBE_BACKOFF_BASE_MS", "1000").parse()?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        youtube_api_key,
        youtube_base_url,
        channel_id,
        max_videos,
        youtube_timeout_secs,
        youtube_max_retries,
        youtube_backoff_base_ms,
    })
}

/// A raw env value remembered alongside its variable name, so parse failures
/// can say which variable was wrong.
struct ParsedVar {
    var: String,
    raw: String,
}

impl ParsedVar {
    fn parse<T>(self) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: self.var,
                reason: e.to_string(),
            })
    }
}

/// Parse `FLOCKSTAT_ENV` into an [`Environment`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FLOCKSTAT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
