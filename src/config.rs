use reqwest::Url;
use std::env;
use std::time::Duration;

use crate::{AppError, AppResult};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: Url,
    /// `None` keeps requests unbounded, matching the API's original client.
    pub request_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let raw_base = lookup("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = parse_base_url(raw_base.trim())?;

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(parse_timeout(raw.trim())?),
            None => None,
        };

        Ok(Self {
            api_base_url,
            request_timeout,
        })
    }

    /// URL of a top-level collection, e.g. `workplaces` → `{base}/workplaces`.
    pub fn endpoint(&self, resource: &str) -> AppResult<Url> {
        self.api_base_url
            .join(resource)
            .map_err(|e| AppError::Config(format!("Cannot build URL for {}: {}", resource, e)))
    }
}

fn parse_base_url(raw: &str) -> AppResult<Url> {
    let mut url = Url::parse(raw)
        .map_err(|e| AppError::Config(format!("API_BASE_URL is not a valid URL ({}): {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Config(format!(
            "API_BASE_URL must use http or https, got {}",
            url.scheme()
        )));
    }

    // Url::join replaces the last path segment unless the path ends with '/'
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn parse_timeout(raw: &str) -> AppResult<Duration> {
    let secs: u64 = raw
        .parse()
        .map_err(|_| AppError::Config(format!("REQUEST_TIMEOUT_SECS must be a whole number, got {}", raw)))?;

    if secs == 0 {
        return Err(AppError::Config("REQUEST_TIMEOUT_SECS must be greater than 0".to_string()));
    }

    Ok(Duration::from_secs(secs))
}
