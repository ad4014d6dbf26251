use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    /// Base URL of the REST backend, without a trailing slash.
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub search_debounce: Duration,
    pub max_upload_bytes: usize,
    pub log_json: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let api_base_url = get_env("API_BASE_URL")
            .or_else(|_| get_env("NEXT_PUBLIC_API_BASE_URL"))
            .map_err(|_| {
                Error::Config(
                    "Missing environment variable: API_BASE_URL (or NEXT_PUBLIC_API_BASE_URL)"
                        .to_string(),
                )
            })?;

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8080"),
            api_base_url: normalize_base_url(&api_base_url)?,
            request_timeout: Duration::from_secs(get_env_parse_or("REQUEST_TIMEOUT_SECS", 30)?),
            search_debounce: Duration::from_millis(get_env_parse_or("SEARCH_DEBOUNCE_MS", 300)?),
            max_upload_bytes: get_env_parse_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            log_json: get_env_or("LOG_FORMAT", "text").eq_ignore_ascii_case("json"),
        })
    }

    /// Configuration pointing at `api_base_url` with every other value defaulted.
    pub fn for_backend(api_base_url: &str) -> Result<Self> {
        Ok(Self {
            server_address: "127.0.0.1:0".to_string(),
            api_base_url: normalize_base_url(api_base_url)?,
            request_timeout: Duration::from_secs(30),
            search_debounce: Duration::from_millis(300),
            max_upload_bytes: 10 * 1024 * 1024,
            log_json: false,
        })
    }
}

/// Checks that the value is an absolute http(s) URL and strips trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid API base URL {:?}: {}", raw, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "API base URL must use http or https, got {}",
            parsed.scheme()
        )));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

fn get_env(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    get_env(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_env(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
