use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_USERNAME: &str = "Dab07";
pub const DEFAULT_STATS_API_URL: &str = "https://leetcode-stats-api.herokuapp.com";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_REPO_LIMIT: u32 = 6;

/// Settings for the read-only upstreams. Every value has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub leetcode_username: String,
    pub github_username: String,
    pub stats_api_url: String,
    pub github_api_url: String,
    pub github_token: Option<String>,
    pub repo_limit: u32,
    pub analytics_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let leetcode_username =
            non_blank("LEETCODE_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        let github_username =
            non_blank("GITHUB_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        let stats_api_url =
            non_blank("LEETCODE_API_URL").unwrap_or_else(|| DEFAULT_STATS_API_URL.to_string());

        let github_api_url =
            non_blank("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());

        let github_token = non_blank("GITHUB_TOKEN");

        let repo_limit = non_blank("REPO_LIMIT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_REPO_LIMIT);

        let analytics_enabled = non_blank("ANALYTICS_ENABLED")
            .map(|v| v.trim().to_lowercase() != "false")
            .unwrap_or(true);

        Ok(Self {
            leetcode_username,
            github_username,
            stats_api_url,
            github_api_url,
            github_token,
            repo_limit,
            analytics_enabled,
        })
    }
}

/// Credentials for the hosted record store. Screens that persist anything
/// cannot start without them.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub anon_key: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("SUPABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config("SUPABASE_URL environment variable not set".to_string()))?;

        let anon_key = lookup("SUPABASE_ANON_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                Error::Config("SUPABASE_ANON_KEY environment variable not set".to_string())
            })?;

        Ok(Self {
            url: url.trim().trim_end_matches('/').to_string(),
            anon_key: anon_key.trim().to_string(),
        })
    }
}
