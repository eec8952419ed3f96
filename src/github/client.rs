use reqwest::{header, Client, StatusCode, Url};

use crate::error::{Error, Result};
use crate::github::rate_limiter::RateLimiter;
use crate::models::GitHubRepo;

/// GitHub caps `per_page` at 100.
pub const MAX_PER_PAGE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("portfolio-core/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder().default_headers(headers).build()?;
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url,
        })
    }

    fn repos_url(&self, username: &str, per_page: u32) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", &per_page.min(MAX_PER_PAGE).to_string());
        Ok(url)
    }

    /// Most recently updated repositories of `username`, first page only.
    pub async fn get_user_repos(&self, username: &str, per_page: u32) -> Result<Vec<GitHubRepo>> {
        if let Some(wait) = self.rate_limiter.exhausted_for().await {
            return Err(Error::RateLimited(wait.as_secs()));
        }

        let url = self.repos_url(username, per_page)?;
        tracing::info!("Fetching repositories for: {}", username);
        tracing::debug!("Fetching: {}", url);

        let response = self.client.get(url).send().await?;
        let (remaining, reset) = RateLimiter::quota_from(response.headers());
        self.rate_limiter.record(remaining, reset).await;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(username.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Failed to fetch repositories for {}: {} - {}",
                username, status, body
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repos_url_sorted_by_recency() {
        let client = GitHubClient::new("https://api.github.com", None).unwrap();
        assert_eq!(
            client.repos_url("Dab07", 6).unwrap().as_str(),
            "https://api.github.com/users/Dab07/repos?sort=updated&per_page=6"
        );
    }

    #[test]
    fn test_per_page_is_capped() {
        let client = GitHubClient::new("https://api.github.com/", Some("token")).unwrap();
        assert!(client
            .repos_url("someone", 500)
            .unwrap()
            .as_str()
            .ends_with("per_page=100"));
    }
}
