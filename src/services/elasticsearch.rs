use crate::config::ElasticsearchSettings;
use crate::services::index::{DocumentIndex, IndexError, SearchResponse};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Elasticsearch HTTP client
///
/// Constructed once at startup and shared read-only by every request.
/// Use [`ElasticsearchClient::connect`] to wait for the cluster to answer
/// before serving traffic.
pub struct ElasticsearchClient {
    base_url: String,
    username: Option<String>,
    password: Option<String>,
    client: Client,
}

impl ElasticsearchClient {
    /// Create a new client without contacting the cluster
    pub fn new(settings: &ElasticsearchSettings) -> Result<Self, IndexError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .danger_accept_invalid_certs(!settings.verify_certs)
            .build()?;

        Ok(Self {
            base_url: settings.url.trim_end_matches('/').to_string(),
            username: settings.username.clone(),
            password: settings.password.clone(),
            client,
        })
    }

    /// Create a client and ping until the cluster answers
    ///
    /// Gives up after `max_retries` failed pings spaced `retry_delay_secs`
    /// apart.
    pub async fn connect(settings: &ElasticsearchSettings) -> Result<Self, IndexError> {
        let client = Self::new(settings)?;
        let attempts = settings.max_retries.max(1);

        for attempt in 1..=attempts {
            if client.ping().await {
                tracing::info!("Connected to Elasticsearch at {}", client.base_url);
                return Ok(client);
            }

            tracing::warn!(
                "Could not reach Elasticsearch at {} (attempt {}/{})",
                client.base_url,
                attempt,
                attempts
            );

            if attempt < attempts {
                tokio::time::sleep(Duration::from_secs(settings.retry_delay_secs)).await;
            }
        }

        Err(IndexError::Unavailable { attempts })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.client.request(method, url);

        match &self.username {
            Some(username) => builder.basic_auth(username, self.password.as_deref()),
            None => builder,
        }
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, IndexError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(IndexError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Check whether an index exists
    pub async fn index_exists(&self, index: &str) -> Result<bool, IndexError> {
        let response = self.request(Method::HEAD, index).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(IndexError::ApiError {
                status: status.as_u16(),
                body: String::new(),
            }),
        }
    }

    /// Create an index with the given settings/mappings body
    pub async fn create_index(&self, index: &str, body: &Value) -> Result<(), IndexError> {
        let response = self.request(Method::PUT, index).json(body).send().await?;
        Self::read_json(response).await?;

        tracing::info!("Created index {}", index);
        Ok(())
    }
}

impl DocumentIndex for ElasticsearchClient {
    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse, IndexError> {
        tracing::debug!("Searching {}: {}", index, body);

        let response = self
            .request(Method::POST, &format!("{}/_search", index))
            .json(body)
            .send()
            .await?;

        let json = Self::read_json(response).await?;
        SearchResponse::from_json(&json)
    }

    async fn index_document(
        &self,
        index: &str,
        id: Option<&str>,
        document: &Value,
    ) -> Result<String, IndexError> {
        let builder = match id {
            Some(id) => self.request(
                Method::PUT,
                &format!("{}/_doc/{}", index, urlencoding::encode(id)),
            ),
            None => self.request(Method::POST, &format!("{}/_doc", index)),
        };

        let response = builder.json(document).send().await?;
        let json = Self::read_json(response).await?;

        let stored_id = json
            .get("_id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| IndexError::InvalidResponse("Missing _id in index response".into()))?;

        tracing::debug!("Indexed document {} into {}", stored_id, index);

        Ok(stored_id.to_string())
    }

    async fn ping(&self) -> bool {
        match self.request(Method::GET, "").send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Ping to {} failed: {}", self.base_url, e);
                false
            }
        }
    }
}
