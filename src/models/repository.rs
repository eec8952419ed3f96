use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository object as returned by `GET /users/{username}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u32,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    pub homepage: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub url: String,
    pub star_count: u32,
    pub primary_language: Option<String>,
    pub topics: Vec<String>,
    pub homepage_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

impl From<GitHubRepo> for RepositorySummary {
    fn from(repo: GitHubRepo) -> Self {
        Self {
            id: repo.id,
            name: repo.name,
            description: repo.description.unwrap_or_default(),
            url: repo.html_url,
            star_count: repo.stargazers_count,
            primary_language: repo.language.filter(|l| !l.trim().is_empty()),
            topics: repo.topics.unwrap_or_default(),
            homepage_url: repo.homepage.filter(|h| !h.trim().is_empty()),
            created_at: repo.created_at,
            last_updated_at: repo.updated_at,
        }
    }
}
