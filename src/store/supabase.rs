use async_trait::async_trait;
use reqwest::{header, Client, Response, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::store::RecordStore;

/// Hosted Postgres exposed through its REST gateway.
pub struct SupabaseStore {
    client: Client,
    rest_url: Url,
}

#[derive(Deserialize)]
struct StoreErrorBody {
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

impl SupabaseStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert("apikey", header::HeaderValue::from_str(&config.anon_key)?);
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", config.anon_key))?,
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("portfolio-core/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder().default_headers(headers).build()?;
        let rest_url = Url::parse(&format!("{}/rest/v1/", config.url))
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.url, e)))?;

        Ok(Self { client, rest_url })
    }

    fn collection_url(&self, collection: &str) -> Result<Url> {
        self.rest_url
            .join(collection)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", collection, e)))
    }

    async fn rejection(response: Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<StoreErrorBody>(&body)
            .ok()
            .and_then(|b| match (b.message, b.details) {
                (Some(m), Some(d)) if !d.is_empty() => Some(format!("{} ({})", m, d)),
                (m, _) => m,
            })
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body
                }
            });

        Error::Store {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl RecordStore for SupabaseStore {
    async fn insert(&self, collection: &str, row: Value) -> Result<()> {
        let url = self.collection_url(collection)?;
        tracing::debug!("Inserting into: {}", url);

        let response = self
            .client
            .post(url)
            .header("Prefer", "return=minimal")
            .json(&Value::Array(vec![row]))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        Ok(())
    }

    async fn select_recent(
        &self,
        collection: &str,
        order_column: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Value>> {
        let mut url = self.collection_url(collection)?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("select", "*")
                .append_pair("order", &format!("{}.desc", order_column));
            if let Some(limit) = limit {
                query.append_pair("limit", &limit.to_string());
            }
        }
        tracing::debug!("Selecting: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn name(&self) -> &str {
        "Supabase"
    }
}
