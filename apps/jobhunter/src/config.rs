use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_MATCH_LIMIT: u32 = 10;

/// Client configuration loaded from environment variables.
/// Every field has a default except the optional download directory and timeout.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub page_size: usize,
    pub match_limit: u32,
    pub download_dir: Option<String>,
    pub timeout_secs: Option<u64>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let page_size = parse_env("JOBHUNTER_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            anyhow::bail!("JOBHUNTER_PAGE_SIZE must be greater than zero");
        }

        Ok(Config {
            api_url: std::env::var("JOBHUNTER_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            page_size,
            match_limit: parse_env("JOBHUNTER_MATCH_LIMIT", DEFAULT_MATCH_LIMIT)?,
            download_dir: optional_env("JOBHUNTER_DOWNLOAD_DIR"),
            timeout_secs: optional_env("JOBHUNTER_TIMEOUT_SECS")
                .map(|v| {
                    v.parse::<u64>()
                        .context("JOBHUNTER_TIMEOUT_SECS must be a whole number of seconds")
                })
                .transpose()?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
