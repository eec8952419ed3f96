use reqwest::{header, Client, StatusCode, Url};

use crate::error::{Error, Result};
use crate::leetcode::payload::StatsPayload;

/// Read-only client for the public coding-challenge stats endpoint.
pub struct StatsClient {
    client: Client,
    base_url: Url,
}

impl StatsClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("portfolio-core/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder().default_headers(headers).build()?;
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(Self { client, base_url })
    }

    fn stats_url(&self, username: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(username);
        Ok(url)
    }

    pub async fn get_stats(&self, username: &str) -> Result<StatsPayload> {
        let url = self.stats_url(username)?;
        tracing::debug!("Fetching: {}", url);

        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(username.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::StatsApi(format!("HTTP error! status: {}", status.as_u16())));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
