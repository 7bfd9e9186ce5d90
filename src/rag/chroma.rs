//! Chroma backend. Talks to a Chroma server over its HTTP API; the
//! server embeds the query text itself via its configured embedding
//! function.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::config::ChromaConfig;
use crate::core::errors::ApiError;

use super::store::{RetrievalResult, VectorStore};

#[derive(Clone)]
pub struct ChromaStore {
    base_url: String,
    collection: String,
    client: Client,
}

impl ChromaStore {
    pub fn new(config: &ChromaConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
            client: Client::new(),
        }
    }
}

/// Chroma returns parallel arrays nested one level deep, one inner list
/// per query text. We always send exactly one query, hence the `[0]`.
fn parse_results(payload: &Value) -> Result<Vec<RetrievalResult>, ApiError> {
    let documents = payload["documents"][0]
        .as_array()
        .ok_or_else(|| ApiError::Upstream("chroma response missing documents".to_string()))?;
    let distances = payload["distances"][0]
        .as_array()
        .ok_or_else(|| ApiError::Upstream("chroma response missing distances".to_string()))?;
    let metadatas = payload["metadatas"][0].as_array();

    let results = documents
        .iter()
        .zip(distances.iter())
        .enumerate()
        .map(|(i, (document, distance))| {
            let source = metadatas
                .and_then(|m| m.get(i))
                .and_then(|m| m["source"].as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("document_{}", i));

            // Cosine distance ranges 0 to 2; normalize and invert it
            // into a similarity score.
            let score = 1.0 - (distance.as_f64().unwrap_or(0.0) / 2.0);

            RetrievalResult {
                content: document.as_str().unwrap_or_default().to_string(),
                source,
                score: score as f32,
            }
        })
        .collect();

    Ok(results)
}

#[async_trait]
impl VectorStore for ChromaStore {
    fn name(&self) -> &str {
        "chroma"
    }

    async fn query(&self, query: &str, top_k: usize) -> Result<Vec<RetrievalResult>, ApiError> {
        let url = format!(
            "{}/api/v1/collections/{}/query",
            self.base_url, self.collection
        );

        let body = json!({
            "query_texts": [query],
            "n_results": top_k,
            "include": ["documents", "metadatas", "distances"],
        });

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::upstream)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "chroma query failed ({}): {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(ApiError::upstream)?;
        parse_results(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_become_similarity_scores() {
        let payload = json!({
            "documents": [["near", "mid", "far"]],
            "metadatas": [[{"source": "a.txt"}, {"source": "b.txt"}, {"source": "c.txt"}]],
            "distances": [[0.0, 1.0, 2.0]],
        });
        let results = parse_results(&payload).unwrap();
        assert_eq!(results[0].score, 1.0);
        assert_eq!(results[1].score, 0.5);
        assert_eq!(results[2].score, 0.0);
        assert_eq!(results[0].source, "a.txt");
    }

    #[test]
    fn missing_source_falls_back_to_position() {
        let payload = json!({
            "documents": [["one", "two"]],
            "metadatas": [[null, {"other": "x"}]],
            "distances": [[0.2, 0.4]],
        });
        let results = parse_results(&payload).unwrap();
        assert_eq!(results[0].source, "document_0");
        assert_eq!(results[1].source, "document_1");
    }

    #[test]
    fn malformed_payload_is_an_upstream_error() {
        let payload = json!({"unexpected": true});
        let err = parse_results(&payload).unwrap_err();
        assert!(matches!(err, ApiError::Upstream(_)));
    }
}
