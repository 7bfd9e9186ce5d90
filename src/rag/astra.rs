//! Astra DB backend. Uses the Data API's `$vectorize` sort, which
//! embeds the query text server-side.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::config::AstraConfig;
use crate::core::errors::ApiError;

use super::store::{RetrievalResult, VectorStore};

#[derive(Debug, Clone)]
pub struct AstraStore {
    endpoint: String,
    token: String,
    keyspace: String,
    collection: String,
    client: Client,
}

impl AstraStore {
    pub fn new(config: &AstraConfig) -> Result<Self, ApiError> {
        let (endpoint, token) = match (&config.endpoint, &config.token) {
            (Some(endpoint), Some(token)) => (endpoint.clone(), token.clone()),
            _ => {
                return Err(ApiError::BadRequest(
                    "ASTRA_DB_ENDPOINT and ASTRA_DB_TOKEN must be set in the environment"
                        .to_string(),
                ))
            }
        };

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
            keyspace: config.keyspace.clone(),
            collection: config.collection.clone(),
            client: Client::new(),
        })
    }
}

fn parse_documents(payload: &Value) -> Result<Vec<RetrievalResult>, ApiError> {
    let documents = payload["data"]["documents"]
        .as_array()
        .ok_or_else(|| ApiError::Upstream("astra response missing data.documents".to_string()))?;

    let results = documents
        .iter()
        .map(|doc| RetrievalResult {
            content: doc["content"].as_str().unwrap_or_default().to_string(),
            source: doc["metadata"]["source"]
                .as_str()
                .unwrap_or("Unknown")
                .to_string(),
            score: doc["$similarity"].as_f64().unwrap_or(0.0) as f32,
        })
        .collect();

    Ok(results)
}

#[async_trait]
impl VectorStore for AstraStore {
    fn name(&self) -> &str {
        "astra"
    }

    async fn query(&self, query: &str, top_k: usize) -> Result<Vec<RetrievalResult>, ApiError> {
        let url = format!(
            "{}/api/json/v1/{}/{}",
            self.endpoint, self.keyspace, self.collection
        );

        let body = json!({
            "find": {
                "sort": { "$vectorize": query },
                "projection": { "$vectorize": true },
                "options": { "limit": top_k, "includeSimilarity": true },
            }
        });

        let res = self
            .client
            .post(&url)
            .header("Token", &self.token)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::upstream)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "astra query failed ({}): {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(ApiError::upstream)?;
        parse_documents(&payload)
    }
}
