use std::str::FromStr;

use crate::domain::cache::DEFAULT_REFRESH_INTERVAL_SECS;
use crate::errors::{FeedError, FeedResult};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_user: String,
    pub github_token: Option<String>,
    pub github_api_url: String,
    pub db_path: String,
    pub cache_interval_secs: i64,
    pub http_timeout_secs: u64,
    pub top_k: usize,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> FeedResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let github_user = std::env::var("FEEDMERGE_GITHUB_USER")
            .map_err(|_| FeedError::MissingEnvVar("FEEDMERGE_GITHUB_USER".to_string()))?;

        let github_token = std::env::var("FEEDMERGE_GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        let github_api_url = std::env::var("FEEDMERGE_GITHUB_API_URL")
            .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string());

        // Default db_path is relative to executable directory
        let db_path = std::env::var("FEEDMERGE_DB_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("feedmerge.db").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./feedmerge.db".to_string())
        });

        Ok(Self {
            github_user,
            github_token,
            github_api_url,
            db_path,
            cache_interval_secs: numeric_var("FEEDMERGE_CACHE_SECS", DEFAULT_REFRESH_INTERVAL_SECS)?,
            http_timeout_secs: numeric_var("FEEDMERGE_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
            top_k: numeric_var("FEEDMERGE_TOP_K", DEFAULT_TOP_K)?,
        })
    }
}

fn numeric_var<T: FromStr>(name: &str, default: T) -> FeedResult<T> {
    match std::env::var(name) {
        Ok(raw) => parse_numeric(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_numeric<T: FromStr>(name: &str, raw: &str) -> FeedResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| FeedError::Config(format!("{} must be a valid number, got {:?}", name, raw)))
}
