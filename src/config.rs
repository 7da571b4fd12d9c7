//! Configuration module - API base URL and client settings

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};

/// Environment variable supplying the rephrase API base URL
pub const ENV_API_URL: &str = "PROMPT_PERFECT_API_URL";

/// Path of the rephrase endpoint, appended to the base URL
pub const REPHRASE_PATH: &str = "/api/rephrase";

/// How long the copy confirmation stays visible
pub const COPY_CONFIRMATION: Duration = Duration::from_millis(2000);

/// Optional configuration parameters for Config::new()
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub request_timeout_secs: Option<u64>,
    pub store_dir: Option<PathBuf>,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL without trailing slash; empty means same-origin relative paths
    pub api_base_url: String,
    pub request_timeout: Option<Duration>,
    pub store_dir: PathBuf,
}

impl Config {
    /// Create a new Config.
    ///
    /// An explicit `api_base_url` wins over the environment; with neither the
    /// base is empty and requests target the relative `/api/rephrase`.
    pub fn new(api_base_url: Option<String>, options: ConfigOptions) -> Result<Arc<Self>> {
        let api_base_url = api_base_url
            .or_else(|| std::env::var(ENV_API_URL).ok())
            .unwrap_or_default();
        let api_base_url = normalize_base_url(&api_base_url)?;

        if options.request_timeout_secs == Some(0) {
            return Err(anyhow!("request timeout must be greater than zero"));
        }

        let store_dir = match options.store_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };

        Ok(Arc::new(Self {
            api_base_url,
            request_timeout: options.request_timeout_secs.map(Duration::from_secs),
            store_dir,
        }))
    }

    /// Full URL of the rephrase endpoint
    pub fn rephrase_url(&self) -> String {
        format!("{}{}", self.api_base_url, REPHRASE_PATH)
    }
}

/// Trim whitespace and trailing slashes; reject schemes other than http(s)
fn normalize_base_url(raw: &str) -> Result<String> {
    let base_url = raw.trim().trim_end_matches('/');

    if base_url.is_empty() {
        return Ok(String::new());
    }

    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(anyhow!(
            "API base URL must start with http:// or https://, got '{}'",
            base_url
        ));
    }

    Ok(base_url.to_string())
}
