use crate::config::Config;
use crate::error::Result;
use crate::github::client::MAX_PER_PAGE;
use crate::github::GitHubClient;
use crate::leetcode::StatsClient;
use crate::models::{ProfileStats, RepositorySummary, StatsReport};

/// Turns the unreliable third-party read APIs into values that can always be
/// rendered: fallback stats or an empty repository list on any failure.
pub struct RemoteStatsAggregator {
    stats: StatsClient,
    github: GitHubClient,
}

impl RemoteStatsAggregator {
    pub fn new(stats: StatsClient, github: GitHubClient) -> Self {
        Self { stats, github }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            StatsClient::new(&config.stats_api_url)?,
            GitHubClient::new(&config.github_api_url, config.github_token.as_deref())?,
        ))
    }

    pub async fn fetch_profile_stats(&self, username: &str) -> StatsReport {
        if username.trim().is_empty() {
            tracing::warn!("No stats username given, using fallback stats");
            return StatsReport::fallback("No username configured");
        }

        tracing::info!("Fetching profile stats for: {}", username);
        match self.try_fetch_profile_stats(username).await {
            Ok(stats) => StatsReport::live(stats),
            Err(e) if e.is_transient() => {
                tracing::warn!("Error fetching stats for {}: {}, using fallback", username, e);
                StatsReport::fallback(e.to_string())
            }
            Err(e) => {
                tracing::error!("Stats client misconfigured: {}, using fallback", e);
                StatsReport::fallback(e.to_string())
            }
        }
    }

    async fn try_fetch_profile_stats(&self, username: &str) -> Result<ProfileStats> {
        self.stats.get_stats(username).await?.into_profile_stats()
    }

    /// Up to `limit` repositories, most recently updated first as the
    /// upstream orders them.
    pub async fn fetch_repositories(&self, username: &str, limit: u32) -> Vec<RepositorySummary> {
        if username.trim().is_empty() || limit == 0 {
            return Vec::new();
        }

        let per_page = limit.min(MAX_PER_PAGE);
        match self.github.get_user_repos(username, per_page).await {
            Ok(repos) => {
                let summaries: Vec<RepositorySummary> = repos
                    .into_iter()
                    .take(per_page as usize)
                    .map(RepositorySummary::from)
                    .collect();
                tracing::info!("Fetched {} repositories for {}", summaries.len(), username);
                summaries
            }
            Err(e) if e.is_transient() => {
                tracing::warn!("Error fetching repositories for {}: {}", username, e);
                Vec::new()
            }
            Err(e) => {
                tracing::error!("Repository client misconfigured: {}", e);
                Vec::new()
            }
        }
    }

    /// Stats and repositories fetched concurrently; neither affects the other.
    pub async fn fetch_overview(
        &self,
        stats_username: &str,
        repo_username: &str,
        limit: u32,
    ) -> Overview {
        let (stats, repositories) = futures::join!(
            self.fetch_profile_stats(stats_username),
            self.fetch_repositories(repo_username, limit)
        );
        Overview {
            stats,
            repositories,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Overview {
    pub stats: StatsReport,
    pub repositories: Vec<RepositorySummary>,
}
