use std::{env, fmt::Display, str::FromStr, time::Duration};

use anyhow::{Result, anyhow};
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ML_URL: &str = "http://localhost:8000/predict";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub ml_url: String,
    pub max_upload_bytes: usize,
    /// `None` waits on the inference endpoint forever.
    pub ml_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            ml_url: DEFAULT_ML_URL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            ml_timeout: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            port: try_load("RUST_PORT", &DEFAULT_PORT.to_string())?,
            ml_url: try_load("ML_URL", DEFAULT_ML_URL)?,
            max_upload_bytes: try_load("MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())?,
            ml_timeout: try_load_optional::<u64>("ML_TIMEOUT_SECS")?.map(Duration::from_secs),
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let value = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    parse(key, &value)
}

fn try_load_optional<T: FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: Display,
{
    match var(key) {
        Some(value) => parse(key, &value).map(Some),
        None => {
            info!("{key} not set, leaving unset");
            Ok(None)
        }
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: Display,
{
    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        anyhow!("Environment misconfigured: {key}={value}: {e}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(parse::<u16>("RUST_PORT", "8080").unwrap(), 8080);
        assert!(parse::<u16>("RUST_PORT", "port").is_err());
        assert!(parse::<u16>("RUST_PORT", "70000").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.port, 3000);
        assert_eq!(config.ml_url, "http://localhost:8000/predict");
        assert!(config.ml_timeout.is_none());
    }
}
